//! Per-registration in-flight bookkeeping.
//!
//! At most one review action may be pending per registration id. A slot is
//! claimed with [`InFlightSet::try_acquire`] and released when the returned
//! [`InFlightGuard`] is dropped, so the release also happens when the
//! owning future is dropped or unwinds.

use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

/// Shared set of registration ids with an action in flight.
///
/// Cloning is cheap and clones share the same set.
#[derive(Debug, Clone, Default)]
pub struct InFlightSet {
    ids: Arc<Mutex<HashSet<String>>>,
}

impl InFlightSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for `id`.
    ///
    /// Returns `None` when an action for `id` is already in flight.
    pub fn try_acquire(&self, id: &str) -> Option<InFlightGuard> {
        let mut ids = self.ids.lock();
        if !ids.insert(id.to_string()) {
            return None;
        }
        Some(InFlightGuard {
            ids: Arc::clone(&self.ids),
            id: id.to_string(),
        })
    }

    /// Whether an action for `id` is pending.
    pub fn contains(&self, id: &str) -> bool {
        self.ids.lock().contains(id)
    }

    /// Number of pending actions.
    pub fn len(&self) -> usize {
        self.ids.lock().len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.ids.lock().is_empty()
    }

    /// Snapshot of pending ids, sorted.
    pub fn snapshot(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.ids.lock().iter().cloned().collect();
        ids.sort();
        ids
    }
}

/// Releases its registration id on drop.
#[derive(Debug)]
#[must_use = "the in-flight slot is released as soon as the guard is dropped"]
pub struct InFlightGuard {
    ids: Arc<Mutex<HashSet<String>>>,
    id: String,
}

impl InFlightGuard {
    /// The registration id held by this guard.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.ids.lock().remove(&self.id);
    }
}
