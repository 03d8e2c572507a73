mod adapter;
mod editor;

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use inventory_core::contract::{DATABASE_VERSION, PATH_ITEMS};
use inventory_core::uri::with_appended_id;
use inventory_core::{Column, DEFAULT_CONFIG_FILE, InventoryConfig, Item, Placeholder};
use inventory_sqlite::{DbHelper, ItemProvider, SortOrder};
use serde::Serialize;
use tracing::{Level, debug};

use adapter::{ItemDetail, ListView, render_table};
use editor::{EditorForm, EditorMode, dummy_item};

/// Output format for `list` and `show`.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum CliOutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

/// Column the item list is ordered by.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum SortKey {
    #[default]
    Id,
    Name,
    Supplier,
    Price,
    Quantity,
}

impl From<SortKey> for Column {
    fn from(key: SortKey) -> Self {
        match key {
            SortKey::Id => Column::Id,
            SortKey::Name => Column::Name,
            SortKey::Supplier => Column::Supplier,
            SortKey::Price => Column::Price,
            SortKey::Quantity => Column::Quantity,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "inventory")]
#[command(version, about = "Keep track of stock items in a local database")]
struct Cli {
    /// Configuration file (defaults to ./inventory.yml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Database file path; overrides the configuration.
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Increase log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every item.
    List(ListArgs),
    /// Show one item.
    Show(ShowArgs),
    /// Add a new item.
    Add(AddArgs),
    /// Edit an existing item; omitted fields keep their stored values.
    Edit(EditArgs),
    /// Delete one item.
    Delete(IdArgs),
    /// Delete every item.
    DeleteAll,
    /// Insert a sample item.
    InsertDummy,
    /// Write an item's stored image to a file.
    ExportImage(ExportImageArgs),
    /// Database maintenance.
    Db(DbArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t)]
    format: CliOutputFormat,
    /// Column to sort by.
    #[arg(long, value_enum, default_value_t)]
    sort: SortKey,
    /// Sort largest first.
    #[arg(long)]
    desc: bool,
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Item identifier.
    id: i64,
    /// Output format.
    #[arg(long, value_enum, default_value_t)]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct IdArgs {
    /// Item identifier.
    id: i64,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Item name.
    #[arg(long)]
    name: String,
    /// Supplier name.
    #[arg(long, default_value = "")]
    supplier: String,
    /// Unit price.
    #[arg(long, default_value = "")]
    price: String,
    /// Units in stock (default 0).
    #[arg(long, default_value = "")]
    quantity: String,
    /// Image file to store as the item's thumbnail.
    #[arg(long)]
    image: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct EditArgs {
    /// Item identifier.
    id: i64,
    /// New name.
    #[arg(long)]
    name: Option<String>,
    /// New supplier; an empty value clears it.
    #[arg(long)]
    supplier: Option<String>,
    /// New price.
    #[arg(long)]
    price: Option<String>,
    /// New quantity.
    #[arg(long)]
    quantity: Option<String>,
    /// New image file.
    #[arg(long)]
    image: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ExportImageArgs {
    /// Item identifier.
    id: i64,
    /// Destination file (JPEG).
    #[arg(long, short)]
    output: PathBuf,
}

#[derive(Debug, Args)]
struct DbArgs {
    #[command(subcommand)]
    operation: DbOperation,
}

#[derive(Debug, Subcommand)]
enum DbOperation {
    /// Show table and schema version status.
    Status,
    /// Drop and recreate the items table, discarding every item.
    Reset,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = load_config(cli.config.as_deref(), cli.db).and_then(|config| match cli.command {
        Command::List(args) => run_list(&config, args),
        Command::Show(args) => run_show(&config, args),
        Command::Add(args) => run_add(&config, args),
        Command::Edit(args) => run_edit(&config, args),
        Command::Delete(args) => run_delete(&config, args),
        Command::DeleteAll => run_delete_all(&config),
        Command::InsertDummy => run_insert_dummy(&config),
        Command::ExportImage(args) => run_export_image(&config, args),
        Command::Db(args) => run_db(&config, args),
    });

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>, db: Option<PathBuf>) -> Result<InventoryConfig, String> {
    let mut config = match path {
        Some(path) => InventoryConfig::load(path)
            .map_err(|e| format!("Failed to load config '{}': {e}", path.display()))?,
        None => InventoryConfig::load_or_default(DEFAULT_CONFIG_FILE)
            .map_err(|e| format!("Failed to load config '{DEFAULT_CONFIG_FILE}': {e}"))?,
    };
    if let Some(db) = db {
        config.database = db;
    }
    debug!(database = %config.database.display(), "configuration loaded");
    Ok(config)
}

fn open_provider(config: &InventoryConfig) -> Result<ItemProvider, String> {
    let placeholder = match &config.placeholder_image {
        Some(path) => Placeholder::from_file(path, config.thumbnail_edge).map_err(|e| {
            format!("Failed to load placeholder image '{}': {e}", path.display())
        })?,
        None => Placeholder::builtin(config.thumbnail_edge)
            .map_err(|e| format!("Failed to render placeholder image: {e}"))?,
    };
    Ok(ItemProvider::new(open_helper(config)?, placeholder))
}

fn item_path(id: i64) -> String {
    with_appended_id(PATH_ITEMS, id)
}

fn fetch_item(provider: &ItemProvider, id: i64) -> Result<Item, String> {
    let cursor = provider
        .query(&item_path(id), None, None, None)
        .map_err(|e| format!("Failed to query item {id}: {e}"))?;
    let mut items = cursor
        .items()
        .map_err(|e| format!("Failed to read item {id}: {e}"))?;
    if items.is_empty() {
        return Err(format!("No item with id {id}"));
    }
    Ok(items.swap_remove(0))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| format!("Failed to serialize JSON: {e}"))?;
    println!("{json}");
    Ok(())
}

fn print_yaml<T: Serialize>(value: &T) -> Result<(), String> {
    let yaml = serde_yaml::to_string(value).map_err(|e| format!("Failed to serialize YAML: {e}"))?;
    print!("{yaml}");
    Ok(())
}

// ---------------------------------------------------------------------------
// list / show
// ---------------------------------------------------------------------------

fn run_list(config: &InventoryConfig, args: ListArgs) -> Result<(), String> {
    let provider = open_provider(config)?;
    let column = Column::from(args.sort);
    let order = if args.desc {
        SortOrder::descending(column)
    } else {
        SortOrder::ascending(column)
    };
    let cursor = provider
        .query(PATH_ITEMS, None, None, Some(order))
        .map_err(|e| format!("Failed to query items: {e}"))?;
    let view = ListView::from_cursor(&cursor).map_err(|e| format!("Failed to read items: {e}"))?;

    match args.format {
        CliOutputFormat::Table if view.items.is_empty() => {
            println!("No items yet. Add one with `inventory add` or `inventory insert-dummy`.");
            Ok(())
        }
        CliOutputFormat::Table => {
            print!("{}", render_table(&view.items));
            Ok(())
        }
        CliOutputFormat::Json => print_json(&view),
        CliOutputFormat::Yaml => print_yaml(&view),
    }
}

fn run_show(config: &InventoryConfig, args: ShowArgs) -> Result<(), String> {
    let provider = open_provider(config)?;
    let item = fetch_item(&provider, args.id)?;
    let detail = ItemDetail::from(&item);
    match args.format {
        CliOutputFormat::Table => {
            print!("{}", detail.render());
            Ok(())
        }
        CliOutputFormat::Json => print_json(&detail),
        CliOutputFormat::Yaml => print_yaml(&detail),
    }
}

// ---------------------------------------------------------------------------
// add / edit / insert-dummy
// ---------------------------------------------------------------------------

fn run_add(config: &InventoryConfig, args: AddArgs) -> Result<(), String> {
    let form = EditorForm {
        name: args.name,
        supplier: args.supplier,
        price: args.price,
        quantity: args.quantity,
        image: args.image,
    };
    let values = form
        .to_values(config.thumbnail_edge)
        .map_err(|e| e.to_string())?;

    let provider = open_provider(config)?;
    let outcome = EditorMode::Create
        .save(&provider, &values)
        .map_err(|e| format!("Error with saving item: {e}"))?;
    println!("{}", outcome.message());
    Ok(())
}

fn run_edit(config: &InventoryConfig, args: EditArgs) -> Result<(), String> {
    let provider = open_provider(config)?;
    let item = fetch_item(&provider, args.id)?;

    let mut form = EditorForm::from_item(&item);
    if let Some(name) = args.name {
        form.name = name;
    }
    if let Some(supplier) = args.supplier {
        form.supplier = supplier;
    }
    if let Some(price) = args.price {
        form.price = price;
    }
    if let Some(quantity) = args.quantity {
        form.quantity = quantity;
    }
    form.image = args.image;

    let values = form
        .to_values(config.thumbnail_edge)
        .map_err(|e| e.to_string())?;
    let outcome = EditorMode::Edit(item_path(args.id))
        .save(&provider, &values)
        .map_err(|e| format!("Error with updating item: {e}"))?;
    if !outcome.is_success() {
        return Err(outcome.message().to_string());
    }
    println!("{}", outcome.message());
    Ok(())
}

fn run_insert_dummy(config: &InventoryConfig) -> Result<(), String> {
    let provider = open_provider(config)?;
    let outcome = EditorMode::Create
        .save(&provider, &dummy_item())
        .map_err(|e| format!("Error with saving item: {e}"))?;
    println!("{}", outcome.message());
    Ok(())
}

// ---------------------------------------------------------------------------
// delete / delete-all
// ---------------------------------------------------------------------------

fn run_delete(config: &InventoryConfig, args: IdArgs) -> Result<(), String> {
    let provider = open_provider(config)?;
    let rows = provider
        .delete(&item_path(args.id), None)
        .map_err(|e| format!("Error with deleting item: {e}"))?;
    if rows == 0 {
        return Err(format!("Error with deleting item: no item with id {}", args.id));
    }
    println!("Item deleted");
    Ok(())
}

fn run_delete_all(config: &InventoryConfig) -> Result<(), String> {
    let provider = open_provider(config)?;
    let rows = provider
        .delete(PATH_ITEMS, None)
        .map_err(|e| format!("Error with deleting items: {e}"))?;
    println!("All items deleted ({rows} removed)");
    Ok(())
}

// ---------------------------------------------------------------------------
// export-image
// ---------------------------------------------------------------------------

fn run_export_image(config: &InventoryConfig, args: ExportImageArgs) -> Result<(), String> {
    let provider = open_provider(config)?;
    let item = fetch_item(&provider, args.id)?;
    fs::write(&args.output, &item.image)
        .map_err(|e| format!("Failed to write '{}': {e}", args.output.display()))?;
    println!(
        "Wrote {} bytes to '{}'",
        item.image.len(),
        args.output.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// db command
// ---------------------------------------------------------------------------

fn run_db(config: &InventoryConfig, args: DbArgs) -> Result<(), String> {
    match args.operation {
        DbOperation::Status => run_db_status(config),
        DbOperation::Reset => run_db_reset(config),
    }
}

fn open_helper(config: &InventoryConfig) -> Result<DbHelper, String> {
    DbHelper::open(&config.database).map_err(|e| {
        format!(
            "Failed to open database '{}': {e}",
            config.database.display()
        )
    })
}

fn run_db_status(config: &InventoryConfig) -> Result<(), String> {
    let helper = open_helper(config)?;
    let status = helper
        .status()
        .map_err(|e| format!("Failed to get database status: {e}"))?;
    println!("Database Status:");
    println!("  File: {}", config.database.display());
    println!(
        "  Table exists: {}",
        if status.table_exists { "yes" } else { "no" }
    );
    println!("  Schema version: {}", status.version);
    println!("  Item count: {}", status.item_count);
    Ok(())
}

fn run_db_reset(config: &InventoryConfig) -> Result<(), String> {
    let mut helper = open_helper(config)?;
    let discarded = helper
        .status()
        .map_err(|e| format!("Failed to get database status: {e}"))?
        .item_count;
    helper
        .on_upgrade(DATABASE_VERSION, DATABASE_VERSION)
        .map_err(|e| format!("Reset failed: {e}"))?;
    println!("Database reset. {discarded} item(s) discarded.");
    Ok(())
}
