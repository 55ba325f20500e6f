//! Store event types.

use serde::{Deserialize, Serialize};

use crate::portfolio::accounting::OperationKind;

/// Events published by the store after a state change.
///
/// These describe what changed; listeners receive the new state alongside
/// and recompute their own views from scratch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// The position history mirror was replaced by the remote history.
    HistoryLoaded { entries: usize },

    /// A buy or sell was applied to the mirror.
    OperationApplied {
        ticker: String,
        kind: OperationKind,
        /// Whether the backend accepted the movement
        persisted: bool,
    },

    /// The asset registry was replaced (initial load or quote enrichment).
    AssetsLoaded { count: usize },

    /// Assets were created, updated, or deleted.
    AssetsChanged { tickers: Vec<String> },
}

impl StoreEvent {
    pub fn history_loaded(entries: usize) -> Self {
        Self::HistoryLoaded { entries }
    }

    pub fn operation_applied(ticker: impl Into<String>, kind: OperationKind, persisted: bool) -> Self {
        Self::OperationApplied {
            ticker: ticker.into(),
            kind,
            persisted,
        }
    }

    pub fn assets_loaded(count: usize) -> Self {
        Self::AssetsLoaded { count }
    }

    pub fn assets_changed(tickers: Vec<String>) -> Self {
        Self::AssetsChanged { tickers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_type_tag() {
        let event = StoreEvent::operation_applied("PETR4", OperationKind::Buy, false);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "operation_applied");
        assert_eq!(json["ticker"], "PETR4");
        assert_eq!(json["kind"], "Compra");
        assert_eq!(json["persisted"], false);
    }
}
