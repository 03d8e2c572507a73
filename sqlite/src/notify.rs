//! Change notification.
//!
//! After a write that affected at least one row, the provider signals the
//! written path through a [`ChangeNotifier`]. Observers hold a
//! [`Subscription`] and re-query when signalled; a [`Change`] carries only
//! the path, never the new data.
//!
//! Delivery rules for a change on path `P`:
//!
//! - observers on `P` itself are signalled;
//! - observers on a path under `P` are signalled (a change to `items`
//!   reaches `items/7`);
//! - observers on a path above `P` are signalled only if they registered
//!   with `notify_for_descendants` (a list on `items` watching edits to
//!   `items/7`).
//!
//! # Example
//!
//! ```
//! use inventory_sqlite::ChangeNotifier;
//!
//! let notifier = ChangeNotifier::new();
//! let list = notifier.register("items", true);
//! let other = notifier.register("items/2", false);
//!
//! assert_eq!(notifier.notify_change("items/1"), 1);
//! assert!(list.drain());
//! assert!(!other.drain());
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use inventory_core::UriMatch;
use tracing::trace;

/// A "something changed here" signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    /// Normalized path that changed.
    pub path: String,
}

struct Observer {
    path: String,
    notify_for_descendants: bool,
    sender: Sender<Change>,
    alive: Weak<()>,
}

impl Observer {
    fn is_alive(&self) -> bool {
        self.alive.strong_count() > 0
    }
}

/// Registry of observers keyed by path.
#[derive(Default)]
pub struct ChangeNotifier {
    observers: Mutex<Vec<Observer>>,
}

impl ChangeNotifier {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer on `path`.
    ///
    /// With `notify_for_descendants`, changes to any path under `path` are
    /// delivered as well. Observers whose subscription was dropped are
    /// removed first, whatever path they watched.
    pub fn register(&self, path: &str, notify_for_descendants: bool) -> Subscription {
        let path = normalize(path);
        let (sender, receiver) = crossbeam_channel::unbounded();
        let token = Arc::new(());
        let mut observers = self.lock();
        observers.retain(Observer::is_alive);
        observers.push(Observer {
            path: path.clone(),
            notify_for_descendants,
            sender,
            alive: Arc::downgrade(&token),
        });
        Subscription {
            path,
            receiver,
            _alive: token,
        }
    }

    /// Signals every observer affected by a change to `path`.
    ///
    /// Returns how many observers were signalled. Observers whose
    /// subscription was dropped are removed.
    pub fn notify_change(&self, path: &str) -> usize {
        let changed = normalize(path);
        let mut signalled = 0;
        self.lock().retain(|observer| {
            if !observer.is_alive() {
                return false;
            }
            let affected = observer.path == changed
                || is_descendant(&observer.path, &changed)
                || (observer.notify_for_descendants && is_descendant(&changed, &observer.path));
            if !affected {
                return true;
            }
            let delivered = observer
                .sender
                .send(Change {
                    path: changed.clone(),
                })
                .is_ok();
            if delivered {
                signalled += 1;
            }
            delivered
        });
        trace!(path = %changed, signalled, "notified observers");
        signalled
    }

    /// Number of registered observers, including ones not yet pruned.
    pub fn observer_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Observer>> {
        self.observers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Receiving end of an observer registration. Dropping it unregisters.
pub struct Subscription {
    path: String,
    receiver: Receiver<Change>,
    _alive: Arc<()>,
}

impl Subscription {
    /// Normalized path this subscription observes.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns a pending change without blocking.
    pub fn try_recv(&self) -> Option<Change> {
        match self.receiver.try_recv() {
            Ok(change) => Some(change),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Waits up to `timeout` for a change.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Change> {
        self.receiver.recv_timeout(timeout).ok()
    }

    /// Discards every pending change, returning whether there was any.
    pub fn drain(&self) -> bool {
        self.receiver.try_iter().count() > 0
    }
}

/// Canonical form of a path; unsupported paths are kept verbatim so they
/// only ever match themselves.
fn normalize(path: &str) -> String {
    UriMatch::classify(path)
        .canonical_path()
        .unwrap_or_else(|| path.to_string())
}

/// Returns `true` if `path` lies strictly under `ancestor`.
fn is_descendant(path: &str, ancestor: &str) -> bool {
    path.strip_prefix(ancestor)
        .is_some_and(|rest| rest.starts_with('/'))
}
