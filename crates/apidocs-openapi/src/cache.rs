//! Single-slot, write-once cache for the assembled document.

use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Default)]
enum SlotState {
    #[default]
    Empty,
    Populated(Arc<Value>),
}

/// Holds at most one description document for the life of its owner.
///
/// Population is serialized by a mutex, so concurrent first callers block
/// until the winner has stored a complete document and then share it. A failed
/// initialization leaves the slot empty. Once populated the slot is never
/// recomputed or cleared.
#[derive(Debug, Default)]
pub struct DescriptionCache {
    slot: Mutex<SlotState>,
}

impl DescriptionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_populated(&self) -> bool {
        matches!(&*self.lock(), SlotState::Populated(_))
    }

    /// Return the cached document or compute, store and return it.
    ///
    /// `init` runs with the slot locked and only while the slot is empty.
    pub fn get_or_try_init<F, E>(&self, init: F) -> Result<Arc<Value>, E>
    where
        F: FnOnce() -> Result<Value, E>,
    {
        let mut slot = self.lock();
        match &*slot {
            SlotState::Populated(doc) => Ok(Arc::clone(doc)),
            SlotState::Empty => {
                let doc = Arc::new(init()?);
                *slot = SlotState::Populated(Arc::clone(&doc));
                Ok(doc)
            }
        }
    }

    // The slot is only ever written with a complete document, so a poisoned
    // lock still guards a consistent state.
    fn lock(&self) -> std::sync::MutexGuard<'_, SlotState> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
