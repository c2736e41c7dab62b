//! Test-only helpers: in-memory storage and temp data directories.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::app::Notator;
use crate::core::quotes::QuoteProvider;
use crate::error::{self, NoteError};
use crate::io::config::NotatorConfig;
use crate::io::persistence::{FsPersistence, Persistence};

/// Seed used by helpers that need a deterministic quote provider.
pub const TEST_SEED: u64 = 7;

/// In-memory [`Persistence`] with one-shot failure injection.
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    files: RefCell<BTreeMap<PathBuf, String>>,
    fail_next: Cell<bool>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, content: &str) {
        self.files.borrow_mut().insert(path.into(), content.to_string());
    }

    pub fn get(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }

    /// Make the next load, save or remove fail with an I/O error.
    pub fn fail_next(&self) {
        self.fail_next.set(true);
    }

    fn check(&self, action: &'static str, path: &Path) -> error::Result<()> {
        if self.fail_next.replace(false) {
            return Err(NoteError::io(
                action,
                path,
                io::Error::other("injected failure"),
            ));
        }
        Ok(())
    }
}

impl Persistence for MemoryPersistence {
    fn load(&self, path: &Path) -> error::Result<String> {
        self.check("read", path)?;
        self.get(path).ok_or_else(|| {
            NoteError::io("read", path, io::Error::from(io::ErrorKind::NotFound))
        })
    }

    fn save(&self, path: &Path, content: &str) -> error::Result<()> {
        self.check("write", path)?;
        self.insert(path, content);
        Ok(())
    }

    fn remove(&self, path: &Path) -> error::Result<()> {
        self.check("remove", path)?;
        self.files
            .borrow_mut()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| NoteError::io("remove", path, io::Error::from(io::ErrorKind::NotFound)))
    }
}

/// Application context over in-memory storage with seeded quotes.
pub fn notator_in_memory(config: NotatorConfig) -> Notator<MemoryPersistence> {
    Notator::new(
        config,
        MemoryPersistence::new(),
        QuoteProvider::with_seed(TEST_SEED),
    )
}

/// Temporary data directory backing a filesystem notator.
pub struct TestDataDir {
    temp: tempfile::TempDir,
}

impl TestDataDir {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create temp dir")?;
        Ok(Self { temp })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.temp.path().join("data")
    }

    /// Default config pointing at this directory's `data/`.
    pub fn config(&self) -> NotatorConfig {
        NotatorConfig {
            data_dir: self.data_dir(),
            ..NotatorConfig::default()
        }
    }

    /// Filesystem-backed application context with seeded quotes.
    pub fn notator(&self, config: NotatorConfig) -> Notator<FsPersistence> {
        let persistence = FsPersistence::new(config.data_dir.clone());
        Notator::new(config, persistence, QuoteProvider::with_seed(TEST_SEED))
    }
}
