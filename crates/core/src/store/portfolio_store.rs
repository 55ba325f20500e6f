use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::assets::{Asset, AssetLookup};
use crate::events::{StoreEvent, StoreListener};
use crate::portfolio::ledger::PositionLedger;
use crate::portfolio::positions::Position;

/// Snapshot of everything the application knows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    pub assets: Vec<Asset>,
    /// One final-state entry per ticker, including closed positions.
    pub history: Vec<Position>,
}

impl StoreState {
    /// Ledger view over the history mirror.
    pub fn ledger(&self) -> PositionLedger {
        PositionLedger::from_history(self.history.clone())
    }

    pub fn find_asset(&self, ticker: &str) -> Option<&Asset> {
        self.assets.iter().find(|asset| asset.ticker == ticker)
    }
}

impl AssetLookup for StoreState {
    fn asset(&self, ticker: &str) -> Option<&Asset> {
        self.find_asset(ticker)
    }
}

/// Partial state replacement. `None` fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct StateUpdate {
    pub assets: Option<Vec<Asset>>,
    pub history: Option<Vec<Position>>,
}

impl StateUpdate {
    pub fn assets(assets: Vec<Asset>) -> Self {
        Self {
            assets: Some(assets),
            history: None,
        }
    }

    pub fn history(history: Vec<Position>) -> Self {
        Self {
            assets: None,
            history: Some(history),
        }
    }
}

/// Handle returned by [`PortfolioStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Owner of the shared application state.
///
/// Writes merge a [`StateUpdate`] under the lock, then every listener is
/// called with a snapshot once the lock has been released.
pub struct PortfolioStore {
    state: RwLock<StoreState>,
    listeners: RwLock<Vec<(SubscriptionId, Arc<dyn StoreListener>)>>,
    next_subscription: AtomicU64,
}

impl Default for PortfolioStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PortfolioStore {
    pub fn new() -> Self {
        Self::with_state(StoreState::default())
    }

    pub fn with_state(state: StoreState) -> Self {
        Self {
            state: RwLock::new(state),
            listeners: RwLock::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
        }
    }

    /// Returns a copy of the current state.
    pub fn get_state(&self) -> StoreState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Merges `update` into the state and notifies every listener.
    pub fn set_state(&self, update: StateUpdate, event: StoreEvent) {
        let snapshot = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            if let Some(assets) = update.assets {
                state.assets = assets;
            }
            if let Some(history) = update.history {
                state.history = history;
            }
            state.clone()
        };

        self.notify(&snapshot, &event);
    }

    pub fn subscribe(&self, listener: Arc<dyn StoreListener>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, listener));
        id
    }

    /// Removes a listener. Returns false if the id was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(subscription, _)| *subscription != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn notify(&self, state: &StoreState, event: &StoreEvent) {
        // Cloned out so a listener may subscribe or unsubscribe while being called.
        let listeners: Vec<Arc<dyn StoreListener>> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        debug!("Notifying {} listener(s) of {:?}", listeners.len(), event);
        for listener in listeners {
            listener.on_change(state, event);
        }
    }
}
