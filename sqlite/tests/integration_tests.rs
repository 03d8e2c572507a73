//! Integration tests for the inventory-sqlite crate.

use std::sync::Arc;
use std::time::Duration;

use inventory_core::contract::{CONTENT_ITEM_TYPE, CONTENT_LIST_TYPE, CONTENT_URI};
use inventory_core::{Column, Item, ItemValues, Placeholder, Value};
use inventory_sqlite::{
    DbHelper, ItemLoader, ItemProvider, Selection, SortOrder, StoreError,
};

fn provider() -> ItemProvider {
    ItemProvider::open_in_memory().unwrap()
}

fn theraband() -> ItemValues {
    ItemValues::new()
        .with(Column::Name, "Theraband")
        .with(Column::Supplier, "DJO Global")
        .with(Column::Price, 5)
        .with(Column::Quantity, 10)
}

fn fetch(provider: &ItemProvider, path: &str) -> Item {
    let cursor = provider.query(path, None, None, None).unwrap();
    assert_eq!(cursor.len(), 1, "expected exactly one row at {path}");
    cursor.items().unwrap().remove(0)
}

fn count(provider: &ItemProvider) -> usize {
    provider.query("items", None, None, None).unwrap().len()
}

// =============================================================================
// Insert / Query
// =============================================================================

#[test]
fn test_insert_then_query_returns_inserted_fields() {
    let p = provider();
    let values = theraband().with(Column::Image, vec![0xFF, 0xD8, 0xFF]);
    let path = p.insert("items", &values).unwrap();

    let item = fetch(&p, &path);
    assert_eq!(item.name, "Theraband");
    assert_eq!(item.supplier.as_deref(), Some("DJO Global"));
    assert_eq!(item.price, 5);
    assert_eq!(item.quantity, 10);
    assert_eq!(item.image, vec![0xFF, 0xD8, 0xFF]);
    assert_eq!(item.to_values(), values);
}

#[test]
fn test_insert_applies_defaults() {
    let p = provider();
    let values = ItemValues::new()
        .with(Column::Name, "Clamp")
        .with(Column::Price, 0);
    let path = p.insert("items", &values).unwrap();

    let item = fetch(&p, &path);
    assert_eq!(item.quantity, 0);
    assert_eq!(item.supplier, None);
    assert_eq!(item.image, p.placeholder().bytes());
}

#[test]
fn test_insert_without_valid_price_does_not_mutate() {
    let p = provider();

    let mut missing = theraband();
    missing.remove(Column::Price);
    assert!(matches!(
        p.insert("items", &missing),
        Err(StoreError::InvalidArgument("price"))
    ));

    let negative = theraband().with(Column::Price, -3);
    assert!(matches!(
        p.insert("items", &negative),
        Err(StoreError::InvalidArgument("price"))
    ));

    assert_eq!(count(&p), 0);
}

#[test]
fn test_insert_without_valid_name_does_not_mutate() {
    let p = provider();

    let mut missing = theraband();
    missing.remove(Column::Name);
    assert!(matches!(
        p.insert("items", &missing),
        Err(StoreError::InvalidArgument("name"))
    ));

    for blank in ["", "   "] {
        let values = theraband().with(Column::Name, blank);
        assert!(matches!(
            p.insert("items", &values),
            Err(StoreError::InvalidArgument("name"))
        ));
    }

    let null = theraband().with(Column::Name, Value::Null);
    assert!(matches!(
        p.insert("items", &null),
        Err(StoreError::InvalidArgument("name"))
    ));

    assert_eq!(count(&p), 0);
}

#[test]
fn test_insert_rejects_negative_quantity_and_id() {
    let p = provider();
    assert!(matches!(
        p.insert("items", &theraband().with(Column::Quantity, -1)),
        Err(StoreError::InvalidArgument("quantity"))
    ));
    assert!(matches!(
        p.insert("items", &theraband().with(Column::Id, 99)),
        Err(StoreError::InvalidArgument("_id"))
    ));
    assert_eq!(count(&p), 0);
}

#[test]
fn test_numeric_text_is_stored_as_integer() {
    let p = provider();
    let values = theraband()
        .with(Column::Price, " 12 ")
        .with(Column::Quantity, "3");
    let path = p.insert("items", &values).unwrap();
    let item = fetch(&p, &path);
    assert_eq!((item.price, item.quantity), (12, 3));
}

#[test]
fn test_content_uri_paths() {
    let p = provider();
    let path = p.insert(CONTENT_URI, &theraband()).unwrap();
    assert_eq!(path, format!("{CONTENT_URI}/1"));
    assert_eq!(fetch(&p, &path).name, "Theraband");
    assert_eq!(fetch(&p, "items/1").name, "Theraband");
}

#[test]
fn test_query_projection_and_order() {
    let p = provider();
    for (name, qty) in [("Washer", 40), ("Anchor", 2), ("Hinge", 15)] {
        p.insert("items", &theraband().with(Column::Name, name).with(Column::Quantity, qty))
            .unwrap();
    }

    let cursor = p
        .query(
            "items",
            Some(&[Column::Name, Column::Quantity]),
            None,
            Some(SortOrder::descending(Column::Quantity)),
        )
        .unwrap();
    assert_eq!(cursor.columns(), &[Column::Name, Column::Quantity]);
    let names: Vec<&str> = cursor.rows().filter_map(|r| r.get_str(Column::Name)).collect();
    assert_eq!(names, vec!["Washer", "Hinge", "Anchor"]);

    // An empty projection means every column.
    let cursor = p.query("items", Some(&[]), None, None).unwrap();
    assert_eq!(cursor.columns(), &Column::ALL);
}

// =============================================================================
// Update
// =============================================================================

#[test]
fn test_update_single_field_leaves_others_untouched() {
    let p = provider();
    let path = p
        .insert("items", &theraband().with(Column::Image, vec![1, 2, 3]))
        .unwrap();
    let before = fetch(&p, &path);

    let rows = p
        .update(&path, &ItemValues::new().with(Column::Quantity, 7), None)
        .unwrap();
    assert_eq!(rows, 1);

    let after = fetch(&p, &path);
    assert_eq!(after.quantity, 7);
    assert_eq!(after.name, before.name);
    assert_eq!(after.supplier, before.supplier);
    assert_eq!(after.price, before.price);
    assert_eq!(after.image, before.image);
}

#[test]
fn test_update_nonexistent_item_returns_zero() {
    let p = provider();
    let rows = p
        .update("items/42", &ItemValues::new().with(Column::Quantity, 7), None)
        .unwrap();
    assert_eq!(rows, 0);
}

#[test]
fn test_update_validates_present_fields() {
    let p = provider();
    let path = p.insert("items", &theraband()).unwrap();

    for (values, field) in [
        (ItemValues::new().with(Column::Name, ""), "name"),
        (ItemValues::new().with(Column::Price, -1), "price"),
        (ItemValues::new().with(Column::Quantity, "lots"), "quantity"),
    ] {
        match p.update(&path, &values, None) {
            Err(StoreError::InvalidArgument(got)) => assert_eq!(got, field),
            other => panic!("expected invalid {field}, got {other:?}"),
        }
    }
    assert_eq!(fetch(&p, &path).to_values(), {
        let mut expected = theraband();
        expected.put(Column::Image, p.placeholder().bytes().to_vec());
        expected
    });
}

#[test]
fn test_update_single_item_discards_caller_selection() {
    let p = provider();
    let first = p.insert("items", &theraband()).unwrap();
    let second = p.insert("items", &theraband()).unwrap();

    let matches_first = Selection::new("_id = ?", [1]);
    let rows = p
        .update(
            &second,
            &ItemValues::new().with(Column::Price, 99),
            Some(&matches_first),
        )
        .unwrap();
    assert_eq!(rows, 1);
    assert_eq!(fetch(&p, &first).price, 5);
    assert_eq!(fetch(&p, &second).price, 99);
}

// =============================================================================
// Delete
// =============================================================================

#[test]
fn test_delete_single_item_twice() {
    let p = provider();
    let keep = p.insert("items", &theraband()).unwrap();
    let gone = p.insert("items", &theraband()).unwrap();

    assert_eq!(p.delete(&gone, None).unwrap(), 1);
    assert_eq!(p.delete(&gone, None).unwrap(), 0);
    assert_eq!(count(&p), 1);
    assert_eq!(fetch(&p, &keep).name, "Theraband");
}

#[test]
fn test_delete_collection_removes_everything() {
    let p = provider();
    for _ in 0..3 {
        p.insert("items", &theraband()).unwrap();
    }
    assert_eq!(p.delete("items", None).unwrap(), 3);
    assert!(p.query("items", None, None, None).unwrap().is_empty());
}

#[test]
fn test_identifiers_are_not_reused_after_delete() {
    let p = provider();
    let first = p.insert("items", &theraband()).unwrap();
    p.delete(&first, None).unwrap();
    assert_eq!(p.insert("items", &theraband()).unwrap(), "items/2");
}

// =============================================================================
// Unsupported paths / types
// =============================================================================

#[test]
fn test_unrecognized_paths_fail_every_operation() {
    let p = provider();
    p.insert("items", &theraband()).unwrap();

    for path in ["pets", "pets/1", "items/abc", "items/1/extra", "content://other/items"] {
        assert!(
            matches!(p.query(path, None, None, None), Err(StoreError::UnsupportedPath(_))),
            "query {path}"
        );
        assert!(
            matches!(p.insert(path, &theraband()), Err(StoreError::UnsupportedPath(_))),
            "insert {path}"
        );
        assert!(
            matches!(
                p.update(path, &theraband(), None),
                Err(StoreError::UnsupportedPath(_))
            ),
            "update {path}"
        );
        assert!(
            matches!(p.delete(path, None), Err(StoreError::UnsupportedPath(_))),
            "delete {path}"
        );
    }
    assert_eq!(count(&p), 1);
}

#[test]
fn test_get_type() {
    let p = provider();
    assert_eq!(p.get_type("items").unwrap(), CONTENT_LIST_TYPE);
    assert_eq!(p.get_type(&format!("{CONTENT_URI}/5")).unwrap(), CONTENT_ITEM_TYPE);
    assert!(p.get_type("pets").is_err());
}

// =============================================================================
// Change notification
// =============================================================================

#[test]
fn test_item_update_reaches_list_observer() {
    let p = provider();
    let path = p.insert("items", &theraband()).unwrap();
    let list = p.register_observer(&p.query("items", None, None, None).unwrap());
    let narrow = p.notifier().register("items", false);

    p.update(&path, &ItemValues::new().with(Column::Quantity, 1), None)
        .unwrap();
    assert!(list.drain());
    assert!(!narrow.drain());
}

#[test]
fn test_bulk_delete_reaches_item_observers_only_when_related() {
    let p = provider();
    let first = p.insert("items", &theraband()).unwrap();
    let second = p.insert("items", &theraband()).unwrap();

    let first_obs = p.register_observer(&p.query(&first, None, None, None).unwrap());
    let second_obs = p.register_observer(&p.query(&second, None, None, None).unwrap());

    p.delete(&first, None).unwrap();
    assert!(first_obs.drain());
    assert!(!second_obs.drain());

    p.delete("items", None).unwrap();
    assert!(second_obs.drain());
}

#[test]
fn test_no_notification_without_effect() {
    let p = provider();
    let sub = p.notifier().register("items", true);

    assert!(p.insert("items", &ItemValues::new()).is_err());
    assert_eq!(p.update("items/9", &theraband(), None).unwrap(), 0);
    assert_eq!(p.delete("items/9", None).unwrap(), 0);
    assert_eq!(p.delete("items", None).unwrap(), 0);
    assert!(sub.try_recv().is_none());

    p.insert("items", &theraband()).unwrap();
    assert_eq!(sub.try_recv().map(|c| c.path), Some("items".to_string()));
}

#[test]
fn test_rejected_writes_are_storage_failures() {
    let helper = DbHelper::open_in_memory().unwrap();
    helper
        .connection()
        .execute_batch(&inventory_sqlite::schema::drop_table_sql())
        .unwrap();
    let p = ItemProvider::new(helper, Placeholder::from_bytes(vec![0xAB]));
    let sub = p.notifier().register("items", true);

    assert!(matches!(
        p.insert("items", &theraband()),
        Err(StoreError::StorageFailure(_))
    ));
    assert!(matches!(
        p.update("items/1", &ItemValues::new().with(Column::Quantity, 3), None),
        Err(StoreError::StorageFailure(_))
    ));
    assert!(matches!(
        p.delete("items", None),
        Err(StoreError::StorageFailure(_))
    ));
    assert!(sub.try_recv().is_none());
}

#[test]
fn test_loader_refreshes_after_writes() {
    let p = Arc::new(provider());
    let mut loader =
        ItemLoader::new(p.clone(), "items").with_sort_order(SortOrder::ascending(Column::Name));
    assert!(loader.load().unwrap().is_empty());

    p.insert("items", &theraband().with(Column::Name, "Zip tie")).unwrap();
    p.insert("items", &theraband().with(Column::Name, "Anchor")).unwrap();

    let cursor = loader.take_refresh().unwrap().unwrap();
    let names: Vec<String> = cursor.items().unwrap().into_iter().map(|i| i.name).collect();
    assert_eq!(names, vec!["Anchor", "Zip tie"]);
    assert!(loader.wait_refresh(Duration::from_millis(5)).unwrap().is_none());
}

// =============================================================================
// Schema lifecycle on disk
// =============================================================================

#[test]
fn test_file_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("inventory.db");

    let p = ItemProvider::open(&db).unwrap();
    p.insert("items", &theraband()).unwrap();
    p.close().unwrap();

    let p = ItemProvider::open(&db).unwrap();
    assert_eq!(count(&p), 1);
    let status = p.status().unwrap();
    assert!(status.table_exists);
    assert_eq!(status.version, 1);
    assert_eq!(status.item_count, 1);
}

#[test]
fn test_upgrade_discards_rows() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("inventory.db");

    let p = ItemProvider::open(&db).unwrap();
    p.insert("items", &theraband()).unwrap();
    p.close().unwrap();

    let helper = DbHelper::open_with_version(&db, 2).unwrap();
    let status = helper.status().unwrap();
    assert_eq!(status.version, 2);
    assert_eq!(status.item_count, 0);
    assert!(status.table_exists);
}

#[test]
fn test_unstamped_file_with_table_reopens_empty() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("inventory.db");

    let helper = DbHelper::open(&db).unwrap();
    helper
        .connection()
        .execute_batch("INSERT INTO items (name, price) VALUES ('Clamp', 7); PRAGMA user_version = 0;")
        .unwrap();
    helper.close().unwrap();

    let helper = DbHelper::open(&db).unwrap();
    let status = helper.status().unwrap();
    assert!(status.table_exists);
    assert_eq!(status.version, 1);
    assert_eq!(status.item_count, 0);
}

#[test]
fn test_downgrade_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("inventory.db");

    DbHelper::open_with_version(&db, 2).unwrap().close().unwrap();
    assert!(matches!(
        DbHelper::open(&db),
        Err(StoreError::Downgrade { from: 2, to: 1 })
    ));
}

#[test]
fn test_custom_placeholder() {
    let helper = DbHelper::open_in_memory().unwrap();
    let p = ItemProvider::new(helper, Placeholder::from_bytes(vec![0xAB]));
    let path = p.insert("items", &theraband()).unwrap();
    assert_eq!(fetch(&p, &path).image, vec![0xAB]);
}

#[test]
fn test_shared_provider_across_threads() {
    let p = Arc::new(provider());
    let handles: Vec<_> = (0..4)
        .map(|n| {
            let p = p.clone();
            std::thread::spawn(move || {
                for i in 0..5 {
                    let values = theraband().with(Column::Quantity, n * 10 + i);
                    p.insert("items", &values).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(count(&p), 20);
}
