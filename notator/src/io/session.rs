//! Open-tab session storage (`<data_dir>/tabs_state.json`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const SESSION_FILE: &str = "tabs_state.json";

/// Bound file paths of the tabs that were open on exit, in display order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Session {
    pub files: Vec<PathBuf>,
}

/// Load the session file.
///
/// A missing or unparsable file yields an empty session; a corrupt state
/// file must never keep the editor from starting.
pub fn load_session(path: &Path) -> Session {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "no session to restore");
            return Session::default();
        }
    };
    match serde_json::from_str::<Session>(&contents) {
        Ok(session) => {
            debug!(path = %path.display(), files = session.files.len(), "session loaded");
            session
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring corrupt session file");
            Session::default()
        }
    }
}

/// Atomically write the session file (temp file + rename).
pub fn write_session(path: &Path, session: &Session) -> Result<()> {
    debug!(path = %path.display(), files = session.files.len(), "writing session");
    let mut buf = serde_json::to_string_pretty(session).context("serialize session")?;
    buf.push('\n');
    super::write_atomic(path, &buf)
}
