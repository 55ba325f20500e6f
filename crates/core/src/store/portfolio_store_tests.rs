#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use rust_decimal_macros::dec;

    use crate::assets::{Asset, AssetClass};
    use crate::events::{MockStoreListener, StoreEvent};
    use crate::portfolio::positions::Position;
    use crate::store::{PortfolioStore, StateUpdate, StoreState};

    #[test]
    fn test_set_state_merges_partial_updates() {
        let store = PortfolioStore::new();
        store.set_state(
            StateUpdate::assets(vec![Asset::new("PETR4", AssetClass::Stock)]),
            StoreEvent::assets_loaded(1),
        );
        store.set_state(
            StateUpdate::history(vec![Position::new("PETR4", dec!(1), dec!(10), dec!(0))]),
            StoreEvent::history_loaded(1),
        );

        let state = store.get_state();
        assert_eq!(state.assets.len(), 1);
        assert_eq!(state.history.len(), 1);
    }

    #[test]
    fn test_get_state_returns_a_copy() {
        let store = PortfolioStore::new();
        let mut copy = store.get_state();
        copy.assets.push(Asset::new("VALE3", AssetClass::Stock));
        assert!(store.get_state().assets.is_empty());
    }

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let store = PortfolioStore::new();
        let listener = MockStoreListener::new();
        let id = store.subscribe(Arc::new(listener.clone()));

        store.set_state(StateUpdate::default(), StoreEvent::assets_loaded(0));
        assert_eq!(listener.len(), 1);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set_state(StateUpdate::default(), StoreEvent::assets_loaded(0));
        assert_eq!(listener.len(), 1);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn test_closure_listener_can_read_the_store() {
        let store = Arc::new(PortfolioStore::new());
        let seen = Arc::new(AtomicUsize::new(0));

        let reader = {
            let store = Arc::downgrade(&store);
            let seen = seen.clone();
            move |_state: &StoreState, _event: &StoreEvent| {
                // Would deadlock if notification ran under the write lock.
                if let Some(store) = store.upgrade() {
                    seen.store(store.get_state().history.len(), Ordering::SeqCst);
                }
            }
        };
        store.subscribe(Arc::new(reader));

        store.set_state(
            StateUpdate::history(vec![
                Position::new("PETR4", dec!(1), dec!(10), dec!(0)),
                Position::new("VALE3", dec!(1), dec!(60), dec!(0)),
            ]),
            StoreEvent::history_loaded(2),
        );
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_state_is_an_asset_lookup() {
        let state = StoreState {
            assets: vec![Asset::new("BOVA11", AssetClass::Etf).with_price(dec!(120))],
            history: Vec::new(),
        };
        let lookup: &dyn crate::assets::AssetLookup = &state;
        assert_eq!(lookup.price("BOVA11"), Some(dec!(120)));
        assert_eq!(lookup.price("PETR4"), None);
    }
}
