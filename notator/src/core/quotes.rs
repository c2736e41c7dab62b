//! Random quotes and haiku prompts.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

const DEFAULT_QUOTES: &[&str] = &[
    "Write drunk, edit sober.",
    "The first draft of anything is a first draft.",
    "Start where you are. Use what you have. Do what you can.",
    "There is no great writing, only great rewriting.",
    "You can't use up creativity. The more you use, the more you have.",
    "A word after a word after a word is power.",
];

const DEFAULT_HAIKU: &[&str] = &[
    "old words on the page\nI let the cursor forget\nnothing stays deleted",
    "a file in the dark\nthree short lines to say goodbye\nthe disk hums along",
    "winter notebook shut\nthe pencil keeps its secrets\nsnow covers the path",
    "one more blank new tab\nthe timer counts down the night\ncoffee has gone cold",
];

/// Uniform random picker over two fixed lists.
///
/// Both lists are non-empty: empty input falls back to the built-in lists.
#[derive(Debug, Clone)]
pub struct QuoteProvider {
    quotes: Vec<String>,
    haiku: Vec<String>,
    rng: StdRng,
}

impl QuoteProvider {
    pub fn new(quotes: Vec<String>, haiku: Vec<String>, rng: StdRng) -> Self {
        Self {
            quotes: non_empty_or(quotes, DEFAULT_QUOTES),
            haiku: non_empty_or(haiku, DEFAULT_HAIKU),
            rng,
        }
    }

    /// Built-in lists with a deterministic source.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Vec::new(), Vec::new(), StdRng::seed_from_u64(seed))
    }

    pub fn random_quote(&mut self) -> &str {
        pick(&self.quotes, &mut self.rng)
    }

    pub fn random_haiku(&mut self) -> &str {
        pick(&self.haiku, &mut self.rng)
    }

    pub fn quotes(&self) -> &[String] {
        &self.quotes
    }

    pub fn haiku(&self) -> &[String] {
        &self.haiku
    }
}

fn non_empty_or(items: Vec<String>, fallback: &[&str]) -> Vec<String> {
    if items.is_empty() {
        fallback.iter().map(|item| (*item).to_string()).collect()
    } else {
        items
    }
}

fn pick<'a>(items: &'a [String], rng: &mut StdRng) -> &'a str {
    items.choose(rng).map(String::as_str).unwrap_or_default()
}

/// Split a quotes file: one quote per non-empty line.
pub fn parse_quotes(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a haiku file: non-empty lines grouped in threes.
///
/// A trailing group with fewer than three lines is kept as-is.
pub fn parse_haiku(raw: &str) -> Vec<String> {
    let lines: Vec<&str> = raw
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::trim_end)
        .collect();
    lines.chunks(3).map(|chunk| chunk.join("\n")).collect()
}
