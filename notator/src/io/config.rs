//! Notator configuration stored in `notator.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "notator.toml";

/// Notator configuration (TOML).
///
/// Missing fields fall back to the defaults below, so an empty file is a
/// valid config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NotatorConfig {
    /// Directory holding notes, quote lists and session state.
    pub data_dir: PathBuf,

    /// File name prefix for suggested Save As names.
    pub note_prefix: String,

    /// Extension (without dot) for suggested Save As names.
    pub note_extension: String,

    /// Upper bound accepted by `timer <seconds>`.
    pub timer_max_secs: u64,

    /// Quotes file, one per line, relative to `data_dir`.
    pub quotes_file: PathBuf,

    /// Haiku file, three lines per haiku, relative to `data_dir`.
    pub haiku_file: PathBuf,

    /// Reopen the previous session's files on start.
    pub restore_session: bool,
}

impl Default for NotatorConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            note_prefix: "note".to_string(),
            note_extension: "md".to_string(),
            timer_max_secs: 120 * 60,
            quotes_file: PathBuf::from("quotes.txt"),
            haiku_file: PathBuf::from("haiku.txt"),
            restore_session: false,
        }
    }
}

impl NotatorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.note_prefix.trim().is_empty() {
            return Err(anyhow!("note_prefix must not be empty"));
        }
        let extension = self.note_extension.trim();
        if extension.is_empty() || extension.starts_with('.') {
            return Err(anyhow!(
                "note_extension must be non-empty and given without a leading dot"
            ));
        }
        if self.timer_max_secs == 0 {
            return Err(anyhow!("timer_max_secs must be > 0"));
        }
        Ok(())
    }

    pub fn quotes_path(&self) -> PathBuf {
        self.data_dir.join(&self.quotes_file)
    }

    pub fn haiku_path(&self) -> PathBuf {
        self.data_dir.join(&self.haiku_file)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `NotatorConfig::default()`.
pub fn load_config(path: &Path) -> Result<NotatorConfig> {
    if !path.exists() {
        let cfg = NotatorConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: NotatorConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &NotatorConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    super::write_atomic(path, &buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, NotatorConfig::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("notator.toml");
        let cfg = NotatorConfig {
            restore_session: true,
            timer_max_secs: 600,
            ..NotatorConfig::default()
        };
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("notator.toml");
        fs::write(&path, "data_dir = \"notes\"\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.data_dir, PathBuf::from("notes"));
        assert_eq!(cfg.note_extension, "md");
        assert_eq!(cfg.haiku_path(), PathBuf::from("notes/haiku.txt"));
    }

    #[test]
    fn zero_timer_cap_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("notator.toml");
        fs::write(&path, "timer_max_secs = 0\n").expect("write");
        let err = load_config(&path).expect_err("invalid");
        assert!(format!("{err:#}").contains("timer_max_secs"));
    }

    #[test]
    fn dotted_extension_is_rejected() {
        let cfg = NotatorConfig {
            note_extension: ".md".to_string(),
            ..NotatorConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
