//! Tabbed note-taking editor core.
//!
//! The crate separates state from side effects:
//!
//! - **[`core`]**: Pure state machines (tabs, tab registry, timer, haiku delete
//!   confirmation, quotes, Hemingway policy). No I/O, fully testable in isolation.
//! - **[`io`]**: Note storage, config, session state and prompt lists.
//!
//! [`app::Notator`] owns one of each core component and exposes the command
//! surface; [`shell`] is the line-oriented front end used by the binary.

pub mod app;
pub mod command;
pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod shell;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
