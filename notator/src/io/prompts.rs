//! Loading quote and haiku lists from the data directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::core::quotes::{QuoteProvider, parse_haiku, parse_quotes};
use crate::io::config::NotatorConfig;

/// Sample lists written by `notator init`.
pub const SAMPLE_QUOTES: &str = "\
Write drunk, edit sober.
The first draft of anything is a first draft.
There is no great writing, only great rewriting.
";

pub const SAMPLE_HAIKU: &str = "\
old words on the page
I let the cursor forget
nothing stays deleted

a file in the dark
three short lines to say goodbye
the disk hums along
";

/// Build the quote provider from the configured files.
///
/// Missing files fall back to the built-in lists. `seed` makes selection
/// deterministic.
pub fn load_quote_provider(cfg: &NotatorConfig, seed: Option<u64>) -> Result<QuoteProvider> {
    let quotes = read_optional(&cfg.quotes_path())?
        .map(|raw| parse_quotes(&raw))
        .unwrap_or_default();
    let haiku = read_optional(&cfg.haiku_path())?
        .map(|raw| parse_haiku(&raw))
        .unwrap_or_default();
    debug!(quotes = quotes.len(), haiku = haiku.len(), "prompt lists loaded");
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Ok(QuoteProvider::new(quotes, haiku, rng))
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .with_context(|| format!("read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &Path) -> NotatorConfig {
        NotatorConfig {
            data_dir: dir.to_path_buf(),
            ..NotatorConfig::default()
        }
    }

    #[test]
    fn reads_lists_from_data_dir() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = config_in(temp.path());
        fs::write(cfg.quotes_path(), "only quote\n").expect("write quotes");
        fs::write(cfg.haiku_path(), SAMPLE_HAIKU).expect("write haiku");

        let mut provider = load_quote_provider(&cfg, Some(1)).expect("load");
        assert_eq!(provider.random_quote(), "only quote");
        assert_eq!(provider.haiku().len(), 2);
    }

    #[test]
    fn missing_files_use_builtin_lists() {
        let temp = tempfile::tempdir().expect("tempdir");
        let provider = load_quote_provider(&config_in(temp.path()), Some(1)).expect("load");
        assert!(!provider.quotes().is_empty());
        assert!(!provider.haiku().is_empty());
    }
}
