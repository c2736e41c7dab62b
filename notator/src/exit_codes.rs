//! Stable exit codes for notator CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed due to invalid config, unreadable data directory or other errors.
pub const INVALID: i32 = 1;
