//! Application context owning every editor component.
//!
//! Front ends hold one [`Notator`] and call its operations; each operation
//! corresponds to one entry of the command surface (new tab, open, save,
//! timer, delete confirmation, ...). Operations that the user should hear
//! about leave a message in the status line.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::delete_flow::{DeleteFlow, SubmitOutcome};
use crate::core::hemingway::permits_edit;
use crate::core::quotes::QuoteProvider;
use crate::core::registry::{Direction, TabRegistry};
use crate::core::tab::{TabId, TabState};
use crate::core::timer::Timer;
use crate::error::{NoteError, Result};
use crate::io::config::NotatorConfig;
use crate::io::naming::suggested_name_now;
use crate::io::persistence::Persistence;
use crate::io::session::{SESSION_FILE, Session, load_session, write_session};

pub struct Notator<P> {
    registry: TabRegistry,
    timer: Timer,
    delete_flow: DeleteFlow,
    quotes: QuoteProvider,
    persistence: P,
    config: NotatorConfig,
    tab_bar_visible: bool,
    status: Option<String>,
}

impl<P: Persistence> Notator<P> {
    pub fn new(config: NotatorConfig, persistence: P, quotes: QuoteProvider) -> Self {
        Self {
            registry: TabRegistry::new(),
            timer: Timer::new(),
            delete_flow: DeleteFlow::new(),
            quotes,
            persistence,
            config,
            tab_bar_visible: true,
            status: None,
        }
    }

    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn delete_flow(&self) -> &DeleteFlow {
        &self.delete_flow
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn config(&self) -> &NotatorConfig {
        &self.config
    }

    pub fn tab_bar_visible(&self) -> bool {
        self.tab_bar_visible
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Take the pending status message, clearing it.
    pub fn take_status(&mut self) -> Option<String> {
        self.status.take()
    }

    fn set_status(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(status = %message, "status updated");
        self.status = Some(message);
    }

    pub fn active_tab(&self) -> Result<&TabState> {
        self.registry.active_tab()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.registry.tabs().iter().any(TabState::is_dirty)
    }

    pub fn new_tab(&mut self) -> TabId {
        let id = self.registry.new_tab();
        info!(%id, "new tab");
        id
    }

    /// Load `path` into a new active tab.
    pub fn open(&mut self, path: &Path) -> Result<TabId> {
        let content = self.persistence.load(path)?;
        let id = self.registry.open_tab(path.to_path_buf(), content);
        info!(%id, path = %path.display(), "opened note");
        self.set_status(format!("Opened {}", path.display()));
        Ok(id)
    }

    /// Save the active tab to its bound path, or via Save As when unbound.
    pub fn save(&mut self) -> Result<PathBuf> {
        let bound = self.registry.active_tab()?.file_path().map(Path::to_path_buf);
        match bound {
            Some(path) => self.write_active(path),
            None => self.save_as(None),
        }
    }

    /// Save the active tab under `path`, or under a timestamped suggestion.
    ///
    /// The tab is only rebound once the write succeeded.
    pub fn save_as(&mut self, path: Option<PathBuf>) -> Result<PathBuf> {
        let path = path.unwrap_or_else(|| self.suggested_path());
        self.write_active(path)
    }

    /// Timestamped name proposed by Save As.
    pub fn suggested_path(&self) -> PathBuf {
        PathBuf::from(suggested_name_now(
            &self.config.note_prefix,
            &self.config.note_extension,
        ))
    }

    fn write_active(&mut self, path: PathBuf) -> Result<PathBuf> {
        let tab = self.registry.active_tab()?;
        self.persistence.save(&path, tab.content())?;

        let tab = self.registry.active_tab_mut()?;
        tab.bind_path(path.clone());
        tab.mark_saved();
        info!(id = %tab.id(), path = %path.display(), "saved note");
        self.set_status(format!("Saved {}", path.display()));
        Ok(path)
    }

    /// Close the active tab.
    pub fn close_tab(&mut self) -> Result<TabState> {
        let id = self.registry.active_tab()?.id();
        self.close_tab_id(id)
    }

    pub fn close_tab_id(&mut self, id: TabId) -> Result<TabState> {
        let closed = self.registry.close_tab(id)?;
        if self
            .delete_flow
            .pending()
            .is_some_and(|pending| pending.target == id)
        {
            self.delete_flow.cancel();
        }
        if closed.is_dirty() {
            warn!(%id, "closed tab with unsaved changes");
            self.set_status(format!("Closed {} (unsaved changes discarded)", closed.title()));
        } else {
            self.set_status(format!("Closed {}", closed.title()));
        }
        Ok(closed)
    }

    pub fn toggle_tab_bar(&mut self) -> bool {
        self.tab_bar_visible = !self.tab_bar_visible;
        self.tab_bar_visible
    }

    pub fn next_tab(&mut self) -> TabId {
        self.registry.switch_to(Direction::Next)
    }

    pub fn prev_tab(&mut self) -> TabId {
        self.registry.switch_to(Direction::Previous)
    }

    pub fn quote(&mut self) -> String {
        self.quotes.random_quote().to_string()
    }

    /// Start the countdown; `seconds` must lie in `1..=timer_max_secs`.
    pub fn set_timer(&mut self, seconds: u64) -> Result<()> {
        let max = self.config.timer_max_secs;
        if seconds == 0 || seconds > max {
            return Err(NoteError::TimerOutOfRange {
                requested: seconds,
                max,
            });
        }
        self.timer.start(seconds);
        info!(seconds, "timer started");
        self.set_status(format!("Timer set to {}", self.timer.label()));
        Ok(())
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset();
        self.set_status("Timer reset");
    }

    /// Advance the timer by one second. Returns true when it just expired.
    pub fn tick(&mut self) -> bool {
        let expired = self.timer.tick();
        if expired {
            info!("timer finished");
            self.set_status("Timer finished");
        }
        expired
    }

    /// Toggle Hemingway mode on the active tab and return the new value.
    pub fn toggle_hemingway(&mut self) -> Result<bool> {
        let enabled = self.registry.active_tab_mut()?.toggle_hemingway();
        let state = if enabled { "on" } else { "off" };
        self.set_status(format!("Hemingway mode {state}"));
        Ok(enabled)
    }

    /// Replace the active tab's content.
    ///
    /// Fails with [`NoteError::HemingwayRejected`] when Hemingway mode is on
    /// and the edit does more than append.
    pub fn edit(&mut self, content: impl Into<String>) -> Result<()> {
        let content = content.into();
        let tab = self.registry.active_tab_mut()?;
        if tab.hemingway() && !permits_edit(tab.content(), &content) {
            return Err(NoteError::HemingwayRejected);
        }
        tab.edit(content);
        Ok(())
    }

    /// Append `text` to the active tab. Always allowed in Hemingway mode.
    pub fn append(&mut self, text: &str) -> Result<()> {
        let tab = self.registry.active_tab_mut()?;
        let mut content = tab.content().to_string();
        content.push_str(text);
        tab.edit(content);
        Ok(())
    }

    /// Start the haiku confirmation for deleting the active tab's file.
    ///
    /// Returns the haiku the user has to retype.
    pub fn request_delete(&mut self) -> Result<String> {
        let tab = self.registry.active_tab()?;
        let id = tab.id();
        if tab.file_path().is_none() {
            return Err(NoteError::Unbound(id));
        }
        let title = tab.title();
        let haiku = self
            .delete_flow
            .request_delete(id, &mut self.quotes)
            .to_string();
        info!(%id, "delete requested");
        self.set_status(format!("Retype the haiku to delete {title}"));
        Ok(haiku)
    }

    /// Submit the retyped haiku. On a match the file is removed and its tab
    /// closed; a mismatch leaves everything untouched.
    pub fn submit_haiku(&mut self, text: &str) -> Result<SubmitOutcome> {
        let outcome = self.delete_flow.submit(text);
        match outcome {
            SubmitOutcome::Confirmed(id) => {
                let path = self
                    .registry
                    .tab(id)?
                    .file_path()
                    .map(Path::to_path_buf)
                    .ok_or(NoteError::Unbound(id))?;
                self.persistence.remove(&path)?;
                self.registry.close_tab(id)?;
                info!(%id, path = %path.display(), "note deleted");
                self.set_status("File deleted");
            }
            SubmitOutcome::Mismatch => {
                debug!("haiku mismatch");
                self.set_status("That is not the haiku. Try again.");
            }
            SubmitOutcome::Idle => {}
        }
        Ok(outcome)
    }

    pub fn cancel_delete(&mut self) {
        if self.delete_flow.is_awaiting() {
            self.delete_flow.cancel();
            self.set_status("Delete cancelled");
        }
    }

    fn session_path(&self) -> PathBuf {
        self.config.data_dir.join(SESSION_FILE)
    }

    /// Reopen the files recorded by the last [`Notator::shutdown`].
    ///
    /// Does nothing unless `restore_session` is enabled. Files that can no
    /// longer be read, or that are already open, are skipped. Returns the
    /// number of reopened tabs.
    pub fn restore_session(&mut self) -> usize {
        if !self.config.restore_session {
            return 0;
        }
        let placeholder = self.registry.active_tab().ok().and_then(|tab| {
            let pristine = tab.file_path().is_none() && tab.content().is_empty();
            pristine.then(|| tab.id())
        });

        let session = load_session(&self.session_path());
        let mut restored = 0;
        for path in &session.files {
            if self.registry.bound_paths().contains(&path.as_path()) {
                debug!(path = %path.display(), "session file already open");
                continue;
            }
            match self.persistence.load(path) {
                Ok(content) => {
                    self.registry.open_tab(path.clone(), content);
                    restored += 1;
                }
                Err(err) => warn!(path = %path.display(), error = %err, "skipping session file"),
            }
        }

        if restored > 0 {
            if let Some(id) = placeholder {
                // The blank startup tab only exists to keep the registry non-empty.
                if let Err(err) = self.registry.close_tab(id) {
                    warn!(%id, error = %err, "failed to drop startup tab");
                }
            }
            self.set_status(format!("Restored {restored} tab(s)"));
        }
        info!(restored, "session restored");
        restored
    }

    /// Record the open files for the next start, when session restore is on.
    pub fn shutdown(&self) -> anyhow::Result<()> {
        if !self.config.restore_session {
            return Ok(());
        }
        let session = Session {
            files: self
                .registry
                .bound_paths()
                .into_iter()
                .map(Path::to_path_buf)
                .collect(),
        };
        write_session(&self.session_path(), &session)
    }
}
