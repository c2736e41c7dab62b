//! Editing state of a single open document.

use std::fmt;
use std::path::{Path, PathBuf};

/// Opaque tab identifier, unique for the lifetime of a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(pub(crate) u64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab-{}", self.0)
    }
}

/// Title used for tabs that have never been saved.
pub const UNTITLED: &str = "Untitled";

/// One open document.
///
/// `dirty` is derived from the content and the last-persisted baseline, so
/// it is true iff the buffer differs from what is on disk. An unbound tab
/// has an empty baseline: it is dirty as soon as it holds any text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabState {
    id: TabId,
    content: String,
    saved_content: String,
    file_path: Option<PathBuf>,
    dirty: bool,
    hemingway: bool,
}

impl TabState {
    /// Blank, unbound, clean tab.
    pub fn blank(id: TabId) -> Self {
        Self {
            id,
            content: String::new(),
            saved_content: String::new(),
            file_path: None,
            dirty: false,
            hemingway: false,
        }
    }

    /// Tab for a file that was just loaded from `path`.
    pub fn opened(id: TabId, path: PathBuf, content: String) -> Self {
        Self {
            id,
            saved_content: content.clone(),
            content,
            file_path: Some(path),
            dirty: false,
            hemingway: false,
        }
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn hemingway(&self) -> bool {
        self.hemingway
    }

    pub fn edit(&mut self, new_content: impl Into<String>) {
        self.content = new_content.into();
        self.dirty = self.content != self.saved_content;
    }

    /// Bind the tab to `path` (Save As). Leaves `dirty` untouched.
    pub fn bind_path(&mut self, path: impl Into<PathBuf>) {
        self.file_path = Some(path.into());
    }

    /// Record that the current content was persisted.
    pub fn mark_saved(&mut self) {
        self.saved_content.clone_from(&self.content);
        self.dirty = false;
    }

    /// Flip Hemingway mode and return the new value.
    pub fn toggle_hemingway(&mut self) -> bool {
        self.hemingway = !self.hemingway;
        self.hemingway
    }

    /// Tab label: file name or `Untitled`, with `*` while unsaved.
    pub fn title(&self) -> String {
        let name = self
            .file_path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| UNTITLED.to_string());
        if self.dirty { format!("{name}*") } else { name }
    }
}
