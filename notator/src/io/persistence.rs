//! Note file storage.
//!
//! The [`Persistence`] trait decouples the application context from the
//! filesystem. Tests use an in-memory store (see `test_support`).

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{NoteError, Result};

/// Load, save and remove note contents. Failures are reported once as
/// [`NoteError::Io`]; callers do not retry.
pub trait Persistence {
    fn load(&self, path: &Path) -> Result<String>;
    fn save(&self, path: &Path, content: &str) -> Result<()>;
    fn remove(&self, path: &Path) -> Result<()>;
}

/// Plain-file storage rooted at the data directory.
///
/// Relative note paths resolve against `root`; absolute paths are used as-is.
#[derive(Debug, Clone)]
pub struct FsPersistence {
    root: PathBuf,
}

impl FsPersistence {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl Persistence for FsPersistence {
    fn load(&self, path: &Path) -> Result<String> {
        let full = self.resolve(path);
        debug!(path = %full.display(), "loading note");
        fs::read_to_string(&full).map_err(|err| NoteError::io("read", full, err))
    }

    fn save(&self, path: &Path, content: &str) -> Result<()> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| NoteError::io("create directory", parent, err))?;
        }
        debug!(path = %full.display(), bytes = content.len(), "saving note");
        fs::write(&full, content).map_err(|err| NoteError::io("write", full, err))
    }

    fn remove(&self, path: &Path) -> Result<()> {
        let full = self.resolve(path);
        info!(path = %full.display(), "removing note");
        fs::remove_file(&full).map_err(|err| NoteError::io("remove", full, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_then_load_uses_data_dir() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = FsPersistence::new(temp.path().join("data"));
        store.save(Path::new("a.md"), "hello\n").expect("save");
        assert!(temp.path().join("data/a.md").exists());
        assert_eq!(store.load(Path::new("a.md")).expect("load"), "hello\n");
    }

    #[test]
    fn absolute_paths_bypass_root() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = FsPersistence::new("unused-root");
        let path = temp.path().join("abs.md");
        store.save(&path, "x").expect("save");
        assert_eq!(fs::read_to_string(&path).expect("read"), "x");
    }

    #[test]
    fn missing_file_is_io_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = FsPersistence::new(temp.path());
        let err = store.load(Path::new("missing.md")).expect_err("missing");
        assert!(matches!(err, NoteError::Io { action: "read", .. }));
        let err = store.remove(Path::new("missing.md")).expect_err("missing");
        assert!(matches!(err, NoteError::Io { action: "remove", .. }));
    }

    #[test]
    fn remove_deletes_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = FsPersistence::new(temp.path());
        store.save(Path::new("gone.md"), "bye").expect("save");
        store.remove(Path::new("gone.md")).expect("remove");
        assert!(!temp.path().join("gone.md").exists());
    }
}
