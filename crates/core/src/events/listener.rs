//! Store listener trait and implementations.

use std::sync::{Arc, Mutex, PoisonError};

use super::StoreEvent;
use crate::store::StoreState;

/// Trait for receiving store change notifications.
///
/// Called after the store's write lock is released, with a snapshot of the
/// state as of the change. Listeners may read the store again but must not
/// block: notification runs on the caller's task.
pub trait StoreListener: Send + Sync {
    fn on_change(&self, state: &StoreState, event: &StoreEvent);
}

impl<F> StoreListener for F
where
    F: Fn(&StoreState, &StoreEvent) + Send + Sync,
{
    fn on_change(&self, state: &StoreState, event: &StoreEvent) {
        self(state, event)
    }
}

/// Mock listener for testing - collects received events.
#[derive(Clone, Default)]
pub struct MockStoreListener {
    events: Arc<Mutex<Vec<StoreEvent>>>,
}

impl MockStoreListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    pub fn events(&self) -> Vec<StoreEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of collected events.
    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl StoreListener for MockStoreListener {
    fn on_change(&self, _state: &StoreState, event: &StoreEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
