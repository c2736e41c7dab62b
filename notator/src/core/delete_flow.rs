//! Haiku-gated delete confirmation.
//!
//! The flow only decides whether a delete is confirmed. Removing the file
//! and closing the tab is left to the caller on [`SubmitOutcome::Confirmed`].

use crate::core::quotes::QuoteProvider;
use crate::core::tab::TabId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub target: TabId,
    pub expected_haiku: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteFlow {
    #[default]
    Closed,
    AwaitingHaiku(PendingDelete),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Text matched; the target may now be deleted.
    Confirmed(TabId),
    /// Text did not match; still awaiting the haiku.
    Mismatch,
    /// Nothing was pending.
    Idle,
}

impl DeleteFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the confirmation for `target` and return the haiku to retype.
    ///
    /// A second request replaces the pending one.
    pub fn request_delete(&mut self, target: TabId, quotes: &mut QuoteProvider) -> &str {
        let expected_haiku = quotes.random_haiku().to_string();
        *self = Self::AwaitingHaiku(PendingDelete {
            target,
            expected_haiku,
        });
        match self {
            Self::AwaitingHaiku(pending) => pending.expected_haiku.as_str(),
            Self::Closed => "",
        }
    }

    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        let Self::AwaitingHaiku(pending) = self else {
            return SubmitOutcome::Idle;
        };
        if normalize(text) != normalize(&pending.expected_haiku) {
            return SubmitOutcome::Mismatch;
        }
        let target = pending.target;
        *self = Self::Closed;
        SubmitOutcome::Confirmed(target)
    }

    pub fn cancel(&mut self) {
        *self = Self::Closed;
    }

    pub fn pending(&self) -> Option<&PendingDelete> {
        match self {
            Self::AwaitingHaiku(pending) => Some(pending),
            Self::Closed => None,
        }
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self, Self::AwaitingHaiku(_))
    }
}

fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n").trim().to_string()
}

/// Word-count shape of a haiku: three lines of 3-5, 4-7 and 3-5 words.
pub fn haiku_shape_ok(text: &str) -> bool {
    let counts: Vec<usize> = text
        .trim()
        .lines()
        .map(|line| line.split_whitespace().count())
        .collect();
    matches!(
        counts.as_slice(),
        [first, second, third]
            if (3..=5).contains(first) && (4..=7).contains(second) && (3..=5).contains(third)
    )
}
