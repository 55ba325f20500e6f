use serde::{Deserialize, Serialize};

/// Result of a mutation that is persisted remotely when possible.
///
/// `persisted` is false when the remote store rejected or never received the
/// change and it was applied to the local state only; `warning` then carries
/// the reason for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome<T> {
    pub value: T,
    pub persisted: bool,
    pub warning: Option<String>,
}

impl<T> SyncOutcome<T> {
    pub fn persisted(value: T) -> Self {
        Self {
            value,
            persisted: true,
            warning: None,
        }
    }

    pub fn local_only(value: T, warning: impl Into<String>) -> Self {
        Self {
            value,
            persisted: false,
            warning: Some(warning.into()),
        }
    }
}
