//! Error kinds surfaced by notator operations.
//!
//! Every failure is local to the action that triggered it; the shell reports
//! the message and keeps running.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::tab::TabId;

#[derive(Debug, Error)]
pub enum NoteError {
    /// File read, write or delete failed. Not retried.
    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Operation referenced a tab that no longer exists.
    #[error("tab {0} not found")]
    NotFound(TabId),
    #[error("tab registry is empty")]
    EmptyRegistry,
    /// Tab has no file on disk (nothing to delete).
    #[error("tab {0} is not bound to a file")]
    Unbound(TabId),
    #[error("hemingway mode is on: text can only be appended")]
    HemingwayRejected,
    #[error("timer must be between 1 and {max} seconds (got {requested})")]
    TimerOutOfRange { requested: u64, max: u64 },
}

impl NoteError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, NoteError>;
