//! Edit policy for Hemingway mode: text may only grow at the end.
//!
//! Tabs only store the flag; callers consult [`permits_edit`] before
//! applying an edit.

/// True if replacing `previous` with `next` only appends text.
pub fn permits_edit(previous: &str, next: &str) -> bool {
    next.starts_with(previous)
}
