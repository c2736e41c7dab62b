//! Library-level scenarios against a real data directory.
//!
//! These drive `Notator` through the same operations the shell uses and
//! check both in-memory tab state and the files left on disk.

use std::fs;
use std::path::Path;

use notator::core::delete_flow::SubmitOutcome;
use notator::io::config::NotatorConfig;
use notator::test_support::TestDataDir;

/// New tab → edit "draft" → Save As (suggested name) → clean → close.
///
/// The registry ends with exactly one fresh blank tab and the note stays on disk.
#[test]
fn draft_save_as_and_close_leaves_one_blank_tab() {
    let dir = TestDataDir::new().expect("temp dir");
    let mut app = dir.notator(dir.config());
    let startup = app.active_tab().expect("active").id();

    let id = app.new_tab();
    app.close_tab_id(startup).expect("close startup tab");
    assert_eq!(app.registry().len(), 1);
    assert_eq!(app.active_tab().expect("active").id(), id);

    app.edit("draft").expect("edit");
    assert!(app.active_tab().expect("active").is_dirty());

    let suggested = app.suggested_path();
    let name = suggested.to_string_lossy().into_owned();
    assert!(name.starts_with("note-") && name.ends_with(".md"));

    let saved = app.save_as(None).expect("save as");
    assert!(!app.active_tab().expect("active").is_dirty());
    let on_disk = fs::read_to_string(dir.data_dir().join(&saved)).expect("read note");
    assert_eq!(on_disk, "draft");

    app.close_tab().expect("close");
    assert_eq!(app.registry().len(), 1);
    let blank = app.active_tab().expect("active");
    assert_ne!(blank.id(), id);
    assert!(blank.content().is_empty());
    assert!(blank.file_path().is_none());
    assert!(!blank.is_dirty());
    assert!(dir.data_dir().join(&saved).exists());
}

/// Delete confirmation: wrong text keeps the file, the exact haiku removes it.
#[test]
fn haiku_gate_controls_file_removal() {
    let dir = TestDataDir::new().expect("temp dir");
    let mut app = dir.notator(dir.config());
    app.edit("to be removed").expect("edit");
    let saved = app
        .save_as(Some(Path::new("victim.md").to_path_buf()))
        .expect("save");
    let full = dir.data_dir().join(&saved);
    assert!(full.exists());

    let haiku = app.request_delete().expect("request");
    assert_eq!(
        app.submit_haiku("wrong text").expect("submit"),
        SubmitOutcome::Mismatch
    );
    assert!(full.exists());

    let outcome = app.submit_haiku(&format!("  {haiku}\n")).expect("submit");
    assert!(matches!(outcome, SubmitOutcome::Confirmed(_)));
    assert!(!full.exists());
    assert_eq!(app.registry().len(), 1);
    assert!(app.active_tab().expect("active").file_path().is_none());
}

/// Session restore reopens the files still on disk and drops the startup tab.
#[test]
fn session_restore_reopens_saved_tabs() {
    let dir = TestDataDir::new().expect("temp dir");
    let config = NotatorConfig {
        restore_session: true,
        ..dir.config()
    };

    let mut app = dir.notator(config.clone());
    app.edit("alpha").expect("edit");
    app.save_as(Some("a.md".into())).expect("save a");
    app.new_tab();
    app.edit("beta").expect("edit");
    app.save_as(Some("b.md".into())).expect("save b");
    app.new_tab();
    app.edit("never saved").expect("edit");
    app.shutdown().expect("shutdown");

    fs::remove_file(dir.data_dir().join("b.md")).expect("remove b");

    let mut restored = dir.notator(config);
    assert_eq!(restored.restore_session(), 1);
    let titles: Vec<String> = restored
        .registry()
        .tabs()
        .iter()
        .map(|tab| tab.title())
        .collect();
    assert_eq!(titles, vec!["a.md"]);
    assert_eq!(restored.active_tab().expect("active").content(), "alpha");
}

#[test]
fn session_restore_is_off_by_default() {
    let dir = TestDataDir::new().expect("temp dir");
    let mut app = dir.notator(dir.config());
    app.edit("alpha").expect("edit");
    app.save_as(Some("a.md".into())).expect("save");
    app.shutdown().expect("shutdown");
    assert!(!dir.data_dir().join("tabs_state.json").exists());

    let mut fresh = dir.notator(dir.config());
    assert_eq!(fresh.restore_session(), 0);
    assert_eq!(fresh.registry().len(), 1);
}

#[test]
fn session_restore_skips_duplicate_entries() {
    let dir = TestDataDir::new().expect("temp dir");
    let config = NotatorConfig {
        restore_session: true,
        ..dir.config()
    };
    fs::create_dir_all(dir.data_dir()).expect("data dir");
    fs::write(dir.data_dir().join("a.md"), "alpha").expect("write note");
    fs::write(dir.data_dir().join("tabs_state.json"), r#"["a.md", "a.md"]"#)
        .expect("write session");

    let mut app = dir.notator(config);
    assert_eq!(app.restore_session(), 1);
    assert_eq!(app.registry().len(), 1);
    assert_eq!(app.registry().bound_paths(), vec![Path::new("a.md")]);
}
