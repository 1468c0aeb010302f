//! Status-file data model and readers for the upwatch update watcher.
//!
//! The privileged system updater writes its progress to a small status file.
//! This crate owns the parsed representation ([`StatusRecord`]) and the two
//! on-disk formats it appears in:
//!
//! - canonical JSON: `{"state": "...", "last_check": n, "last_update": n}`
//! - legacy line-oriented `key=value` text
//!
//! Reads are pure: a missing file yields the default record, a corrupt file
//! yields an error and commits nothing.

mod record;
mod source;
mod state;

pub use record::StatusRecord;
pub use source::{StatusFormat, StatusSource, read_status, read_status_legacy};
pub use state::UpdateState;

/// Errors produced while reading a status source.
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed status file: {0}")]
    Parse(String),
}
