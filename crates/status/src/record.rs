//! Parsed snapshot of the updater's status file.

use serde::{Deserialize, Serialize};

use crate::state::UpdateState;

/// One atomic snapshot of the external updater's state.
///
/// Timestamps are seconds since the Unix epoch, as written by the updater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusRecord {
    #[serde(default)]
    pub state: UpdateState,
    #[serde(default)]
    pub last_check: i64,
    #[serde(default)]
    pub last_update: i64,
}

impl StatusRecord {
    /// Parses the canonical JSON status format.
    ///
    /// Fails only when the input is not a JSON object. A field that is
    /// missing or carries the wrong type degrades to its default instead of
    /// failing the whole read; an unrecognized `state` string folds to
    /// `no-updates`.
    pub fn from_json(data: &str) -> Result<Self, String> {
        let value: serde_json::Value =
            serde_json::from_str(data).map_err(|e| e.to_string())?;

        let Some(root) = value.as_object() else {
            return Err("root is not an object".into());
        };

        let state = root
            .get("state")
            .and_then(|v| v.as_str())
            .map(UpdateState::from_raw)
            .unwrap_or_default();

        let last_check = root.get("last_check").and_then(|v| v.as_i64()).unwrap_or(0);
        let last_update = root
            .get("last_update")
            .and_then(|v| v.as_i64())
            .unwrap_or(0);

        Ok(Self {
            state,
            last_check,
            last_update,
        })
    }
}
