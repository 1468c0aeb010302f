//! Reading a status source from disk in either supported format.

use std::path::{Path, PathBuf};

use crate::record::StatusRecord;
use crate::state::UpdateState;
use crate::StatusError;

/// On-disk format of a status source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFormat {
    /// Canonical JSON record.
    #[default]
    Json,
    /// Legacy line-oriented `key=value` text.
    Legacy,
}

/// A status source path together with its format.
#[derive(Debug, Clone)]
pub struct StatusSource {
    pub path: PathBuf,
    pub format: StatusFormat,
}

impl StatusSource {
    pub fn new(path: impl Into<PathBuf>, format: StatusFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Reads and parses the source.
    pub fn load(&self) -> Result<StatusRecord, StatusError> {
        match self.format {
            StatusFormat::Json => read_status(&self.path),
            StatusFormat::Legacy => read_status_legacy(&self.path),
        }
    }
}

/// Reads the canonical JSON status file.
///
/// A missing file is not an error: the updater simply hasn't run yet, so the
/// default "no updates" record is returned. A file that exists but doesn't
/// parse as a JSON object is an error; the caller keeps its previous state.
pub fn read_status(path: &Path) -> Result<StatusRecord, StatusError> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(StatusRecord::default());
        }
        Err(e) => return Err(StatusError::Io(e)),
    };

    StatusRecord::from_json(&data).map_err(StatusError::Parse)
}

/// Reads the legacy `key=value` status file.
///
/// Recognized keys: `last_update`, `last_check`, `update_available`. Blank
/// lines and unknown keys are skipped; a malformed numeric value leaves the
/// previously parsed value for that key in place. `update_available` above
/// zero maps to the updates-available state.
pub fn read_status_legacy(path: &Path) -> Result<StatusRecord, StatusError> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(StatusRecord::default());
        }
        Err(e) => return Err(StatusError::Io(e)),
    };

    let mut last_update = 0i64;
    let mut last_check = 0i64;
    let mut update_available = 0i64;

    for line in data.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        match key.trim() {
            "last_update" => parse_field(value, &mut last_update),
            "last_check" => parse_field(value, &mut last_check),
            "update_available" => parse_field(value, &mut update_available),
            _ => {}
        }
    }

    let state = if update_available > 0 {
        UpdateState::UpdatesAvailable
    } else {
        UpdateState::NoUpdates
    };

    Ok(StatusRecord {
        state,
        last_check,
        last_update,
    })
}

fn parse_field(value: &str, slot: &mut i64) {
    match value.trim().parse::<i64>() {
        Ok(n) => *slot = n,
        Err(_) => {
            tracing::debug!(value, "ignoring malformed numeric field");
        }
    }
}
