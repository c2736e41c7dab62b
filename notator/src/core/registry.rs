//! Ordered collection of open tabs with an active cursor.

use std::path::{Path, PathBuf};

use crate::core::tab::{TabId, TabState};
use crate::error::{NoteError, Result};

/// Direction for circular tab navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Tabs in display order.
///
/// The registry is never empty: it starts with one blank tab and replaces
/// the last tab with a blank one when it is closed. `active` always indexes
/// into `tabs`.
#[derive(Debug, Clone)]
pub struct TabRegistry {
    tabs: Vec<TabState>,
    active: usize,
    next_id: u64,
}

impl Default for TabRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TabRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            tabs: Vec::new(),
            active: 0,
            next_id: 1,
        };
        registry.new_tab();
        registry
    }

    fn allocate_id(&mut self) -> TabId {
        let id = TabId(self.next_id);
        self.next_id += 1;
        id
    }

    fn push_active(&mut self, tab: TabState) -> TabId {
        let id = tab.id();
        self.tabs.push(tab);
        self.active = self.tabs.len() - 1;
        id
    }

    /// Append a blank tab and make it active.
    pub fn new_tab(&mut self) -> TabId {
        let id = self.allocate_id();
        self.push_active(TabState::blank(id))
    }

    /// Append a tab holding a loaded file and make it active.
    pub fn open_tab(&mut self, path: PathBuf, content: String) -> TabId {
        let id = self.allocate_id();
        self.push_active(TabState::opened(id, path, content))
    }

    /// Remove tab `id` and return it.
    ///
    /// When the active tab is closed, the tab that slides into its index
    /// becomes active (or the last tab if it was at the end).
    pub fn close_tab(&mut self, id: TabId) -> Result<TabState> {
        let index = self.position(id).ok_or(NoteError::NotFound(id))?;
        let removed = self.tabs.remove(index);

        if self.tabs.is_empty() {
            self.active = 0;
            self.new_tab();
        } else if index < self.active {
            self.active -= 1;
        } else if self.active >= self.tabs.len() {
            self.active = self.tabs.len() - 1;
        }
        Ok(removed)
    }

    /// Move the active cursor circularly. No-op with a single tab.
    pub fn switch_to(&mut self, direction: Direction) -> TabId {
        let len = self.tabs.len();
        if len > 1 {
            self.active = match direction {
                Direction::Next => (self.active + 1) % len,
                Direction::Previous => (self.active + len - 1) % len,
            };
        }
        self.tabs[self.active].id()
    }

    /// Make tab `id` active.
    pub fn activate(&mut self, id: TabId) -> Result<()> {
        self.active = self.position(id).ok_or(NoteError::NotFound(id))?;
        Ok(())
    }

    pub fn active_tab(&self) -> Result<&TabState> {
        self.tabs.get(self.active).ok_or(NoteError::EmptyRegistry)
    }

    pub fn active_tab_mut(&mut self) -> Result<&mut TabState> {
        self.tabs.get_mut(self.active).ok_or(NoteError::EmptyRegistry)
    }

    pub fn tab(&self, id: TabId) -> Result<&TabState> {
        self.tabs
            .iter()
            .find(|tab| tab.id() == id)
            .ok_or(NoteError::NotFound(id))
    }

    pub fn tabs(&self) -> &[TabState] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Always false while the registry invariant holds.
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Bound file paths of all tabs, in display order.
    pub fn bound_paths(&self) -> Vec<&Path> {
        self.tabs.iter().filter_map(TabState::file_path).collect()
    }

    fn position(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(count: usize) -> (TabRegistry, Vec<TabId>) {
        let mut registry = TabRegistry::new();
        let mut ids = vec![registry.active_tab().expect("active").id()];
        for _ in 1..count {
            ids.push(registry.new_tab());
        }
        (registry, ids)
    }

    #[test]
    fn starts_with_one_blank_active_tab() {
        let registry = TabRegistry::new();
        assert_eq!(registry.len(), 1);
        let tab = registry.active_tab().expect("active");
        assert!(tab.content().is_empty());
        assert!(!tab.is_dirty());
    }

    #[test]
    fn new_tab_is_appended_and_active() {
        let (registry, ids) = registry_with(3);
        assert_eq!(registry.active_index(), 2);
        assert_eq!(registry.active_tab().expect("active").id(), ids[2]);
    }

    #[test]
    fn ids_are_unique_across_closes() {
        let (mut registry, ids) = registry_with(2);
        registry.close_tab(ids[1]).expect("close");
        let fresh = registry.new_tab();
        assert!(!ids.contains(&fresh));
    }

    #[test]
    fn closing_active_prefers_same_index() {
        let (mut registry, ids) = registry_with(3);
        registry.activate(ids[1]).expect("activate");
        registry.close_tab(ids[1]).expect("close");
        assert_eq!(registry.active_tab().expect("active").id(), ids[2]);
    }

    #[test]
    fn closing_active_last_falls_back_to_new_last() {
        let (mut registry, ids) = registry_with(3);
        registry.close_tab(ids[2]).expect("close");
        assert_eq!(registry.active_tab().expect("active").id(), ids[1]);
    }

    #[test]
    fn closing_tab_before_active_keeps_active_tab() {
        let (mut registry, ids) = registry_with(3);
        registry.close_tab(ids[0]).expect("close");
        assert_eq!(registry.active_tab().expect("active").id(), ids[2]);
        assert_eq!(registry.active_index(), 1);
    }

    #[test]
    fn closing_last_tab_creates_blank_one() {
        let (mut registry, ids) = registry_with(1);
        registry.close_tab(ids[0]).expect("close");
        assert_eq!(registry.len(), 1);
        assert_ne!(registry.active_tab().expect("active").id(), ids[0]);
    }

    #[test]
    fn close_never_leaves_registry_empty() {
        for count in 1..5 {
            for victim in 0..count {
                let (mut registry, ids) = registry_with(count);
                registry.close_tab(ids[victim]).expect("close");
                assert!(!registry.is_empty());
                assert!(registry.active_index() < registry.len());
            }
        }
    }

    #[test]
    fn close_unknown_id_is_not_found() {
        let (mut registry, _) = registry_with(1);
        let err = registry.close_tab(TabId(99)).expect_err("missing");
        assert!(matches!(err, NoteError::NotFound(TabId(99))));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn next_n_times_returns_to_start() {
        let (mut registry, ids) = registry_with(4);
        registry.activate(ids[1]).expect("activate");
        for _ in 0..registry.len() {
            registry.switch_to(Direction::Next);
        }
        assert_eq!(registry.active_tab().expect("active").id(), ids[1]);
    }

    #[test]
    fn switch_wraps_both_ways() {
        let (mut registry, ids) = registry_with(3);
        assert_eq!(registry.switch_to(Direction::Next), ids[0]);
        assert_eq!(registry.switch_to(Direction::Previous), ids[2]);
    }

    #[test]
    fn switch_with_single_tab_is_noop() {
        let (mut registry, ids) = registry_with(1);
        assert_eq!(registry.switch_to(Direction::Next), ids[0]);
        assert_eq!(registry.switch_to(Direction::Previous), ids[0]);
        assert_eq!(registry.active_index(), 0);
    }

    #[test]
    fn bound_paths_skip_unbound_tabs() {
        let mut registry = TabRegistry::new();
        registry.open_tab(PathBuf::from("a.md"), "a".to_string());
        registry.new_tab();
        registry.open_tab(PathBuf::from("b.md"), "b".to_string());
        assert_eq!(
            registry.bound_paths(),
            vec![Path::new("a.md"), Path::new("b.md")]
        );
    }
}
