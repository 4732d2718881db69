use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use bucketview::tui::view::{render, Tone};
use bucketview::tui::{App, Key, UiState};
use bucketview::{BrowserConfig, DisplayMode, Store};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("bvtest-tui-{prefix}-{pid}-{t}-{id}"))
}

fn open_store(root: &PathBuf) -> Result<Arc<Store>> {
    let cfg = BrowserConfig::default().with_open_timeout_ms(200);
    Ok(Arc::new(Store::open_with_config(root.join("t.redb"), &cfg)?))
}

fn type_text(app: &mut App, s: &str) {
    for c in s.chars() {
        app.handle_key(Key::Char(c));
    }
}

fn screen(app: &App) -> String {
    render(app)
        .into_iter()
        .map(|l| l.text)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn create_bucket_key_and_edit_value() -> Result<()> {
    let root = unique_root("create");
    let store = open_store(&root)?;
    let mut app = App::new(store.clone(), DisplayMode::Raw)?;
    assert!(screen(&app).contains("No buckets found"));

    // ctrl+n does nothing without a bucket
    app.handle_key(Key::Ctrl('n'));
    assert_eq!(app.state(), UiState::BucketList);

    app.handle_key(Key::Ctrl('t'));
    assert_eq!(app.state(), UiState::CreateBucket);
    // letters bound to actions are still text here
    type_text(&mut app, "jobs");
    assert_eq!(app.input().value(), "jobs");
    app.handle_key(Key::Enter);
    assert_eq!(app.state(), UiState::BucketList);
    assert_eq!(app.current_bucket(), Some("jobs"));
    assert_eq!(store.list_buckets()?, vec!["jobs"]);

    app.handle_key(Key::Ctrl('n'));
    assert_eq!(app.state(), UiState::CreateKey);
    type_text(&mut app, "k1");
    app.handle_key(Key::Enter);
    assert_eq!(app.state(), UiState::BucketList);
    assert_eq!(store.get_value("jobs", "k1")?, Some(Vec::new()));
    assert_eq!(app.selected_key(), Some("k1"));

    // enter opens the value editor with the current value
    app.handle_key(Key::Enter);
    assert_eq!(app.state(), UiState::EditValue);
    assert_eq!(app.input().value(), "");
    type_text(&mut app, "hello");
    app.handle_key(Key::Enter);
    assert_eq!(store.get_value("jobs", "k1")?, Some(b"hello".to_vec()));
    assert_eq!(app.rows()[0].value, b"hello".to_vec());

    // values can be cleared back to empty
    app.handle_key(Key::Enter);
    app.handle_key(Key::Ctrl('u'));
    app.handle_key(Key::Enter);
    assert_eq!(store.get_value("jobs", "k1")?, Some(Vec::new()));

    drop(app);
    store.close()?;
    let _ = fs::remove_dir_all(&root);
    Ok(())
}

#[test]
fn duplicate_key_shows_error_and_keeps_value() -> Result<()> {
    let root = unique_root("dup");
    let store = open_store(&root)?;
    store.create_bucket("b")?;
    store.put_value("b", "k", b"keep")?;
    let mut app = App::new(store.clone(), DisplayMode::Raw)?;

    app.handle_key(Key::Ctrl('n'));
    type_text(&mut app, "k");
    app.handle_key(Key::Enter);
    assert_eq!(app.state(), UiState::CreateKey);
    assert!(app.error().is_some());
    assert_eq!(store.get_value("b", "k")?, Some(b"keep".to_vec()));

    let lines = render(&app);
    assert!(lines.iter().any(|l| l.tone == Tone::Error && l.text.starts_with("Error:")));

    // esc goes back and clears the banner
    app.handle_key(Key::Esc);
    assert_eq!(app.state(), UiState::BucketList);
    assert!(app.error().is_none());

    drop(app);
    store.close()?;
    let _ = fs::remove_dir_all(&root);
    Ok(())
}

#[test]
fn rename_and_delete_through_the_ui() -> Result<()> {
    let root = unique_root("rename");
    let store = open_store(&root)?;
    store.create_bucket("a")?;
    store.create_bucket("users")?;
    store.put_value("users", "alice", b"1")?;
    store.put_value("users", "bob", b"2")?;
    let mut app = App::new(store.clone(), DisplayMode::Raw)?;
    assert_eq!(app.current_bucket(), Some("a"));

    app.handle_key(Key::Tab);
    assert_eq!(app.current_bucket(), Some("users"));
    assert_eq!(app.rows().len(), 2);

    // rename key alice -> alicia
    app.handle_key(Key::Ctrl('e'));
    assert_eq!(app.state(), UiState::EditKeyName);
    assert_eq!(app.input().value(), "alice");
    app.handle_key(Key::Backspace);
    type_text(&mut app, "ia");
    assert_eq!(app.input().value(), "alicia");
    app.handle_key(Key::Enter);
    assert_eq!(store.list_keys("users")?, vec!["alicia", "bob"]);
    assert_eq!(app.selected_key(), Some("alicia"));

    // renaming onto an existing bucket keeps the editor open with an error
    app.handle_key(Key::Ctrl('b'));
    app.handle_key(Key::Ctrl('u'));
    type_text(&mut app, "a");
    app.handle_key(Key::Enter);
    assert_eq!(app.state(), UiState::EditBucketName);
    assert!(app.error().is_some());
    app.handle_key(Key::Ctrl('u'));
    type_text(&mut app, "people");
    app.handle_key(Key::Enter);
    assert_eq!(app.state(), UiState::BucketList);
    assert_eq!(store.list_buckets()?, vec!["a", "people"]);
    assert_eq!(app.current_bucket(), Some("people"));

    // delete bob (second row)
    app.handle_key(Key::Down);
    app.handle_key(Key::Ctrl('d'));
    assert_eq!(app.state(), UiState::ConfirmDeleteKey);
    assert!(screen(&app).contains("delete key 'bob'"));
    app.handle_key(Key::Enter);
    assert_eq!(store.list_keys("people")?, vec!["alicia"]);
    assert_eq!(app.selected(), 0);

    // esc cancels a bucket delete
    app.handle_key(Key::Ctrl('r'));
    app.handle_key(Key::Esc);
    assert_eq!(store.list_buckets()?, vec!["a", "people"]);

    app.handle_key(Key::Ctrl('r'));
    app.handle_key(Key::Enter);
    assert_eq!(store.list_buckets()?, vec!["a"]);
    assert_eq!(app.current_bucket(), Some("a"));

    drop(app);
    store.close()?;
    let _ = fs::remove_dir_all(&root);
    Ok(())
}

#[test]
fn settings_switch_display_mode() -> Result<()> {
    let root = unique_root("settings");
    let store = open_store(&root)?;
    store.create_bucket("b")?;
    store.put_value("b", "k", &[0xde, 0xad, 0xbe, 0xef])?;
    let mut app = App::new(store.clone(), DisplayMode::Raw)?;
    app.resize(100, 30);

    app.handle_key(Key::Ctrl('o'));
    assert_eq!(app.state(), UiState::Settings);
    assert!(screen(&app).contains("String (current)"));
    for _ in 0..5 {
        app.handle_key(Key::Down);
    }
    assert_eq!(app.settings_selection(), 3);
    app.handle_key(Key::Enter);
    assert_eq!(app.display_mode(), DisplayMode::Hex);

    let s = screen(&app);
    assert!(s.contains("Display Mode: Hex"), "{s}");
    assert!(s.contains("deadbeef"), "{s}");
    // stored bytes untouched
    assert_eq!(store.get_value("b", "k")?, Some(vec![0xde, 0xad, 0xbe, 0xef]));

    drop(app);
    store.close()?;
    let _ = fs::remove_dir_all(&root);
    Ok(())
}

#[test]
fn binary_value_is_not_opened_in_the_editor() -> Result<()> {
    let root = unique_root("binary");
    let store = open_store(&root)?;
    store.create_bucket("b")?;
    store.put_value("b", "blob", &[0xff, 0x00, 0x80])?;
    let mut app = App::new(store.clone(), DisplayMode::Raw)?;

    app.handle_key(Key::Enter);
    assert_eq!(app.state(), UiState::BucketList);
    assert!(app.error().unwrap_or_default().contains("not UTF-8"));
    // a second enter must not write anything back either
    app.handle_key(Key::Enter);
    assert_eq!(store.get_value("b", "blob")?, Some(vec![0xff, 0x00, 0x80]));

    drop(app);
    store.close()?;
    let _ = fs::remove_dir_all(&root);
    Ok(())
}

#[test]
fn help_quit_and_tab_selection() -> Result<()> {
    let root = unique_root("keys");
    let store = open_store(&root)?;
    for b in ["one", "three", "two"] {
        store.create_bucket(b)?;
    }
    let mut app = App::new(store.clone(), DisplayMode::Raw)?;

    app.handle_key(Key::Char('3'));
    assert_eq!(app.current_bucket(), Some("two"));
    app.handle_key(Key::Char('9'));
    assert_eq!(app.current_bucket(), Some("two"));
    app.handle_key(Key::BackTab);
    assert_eq!(app.current_bucket(), Some("three"));
    app.handle_key(Key::Char('h'));
    app.handle_key(Key::Char('h'));
    assert_eq!(app.current_bucket(), Some("one"));

    app.handle_key(Key::Char('?'));
    assert!(app.show_help());
    assert!(screen(&app).contains("toggle help"));
    app.handle_key(Key::Char('?'));
    assert!(!app.show_help());

    // '?' is text inside a form
    app.handle_key(Key::Ctrl('t'));
    app.handle_key(Key::Char('?'));
    assert!(!app.show_help());
    assert_eq!(app.input().value(), "?");
    // ctrl+t closes the form again
    app.handle_key(Key::Ctrl('t'));
    assert_eq!(app.state(), UiState::BucketList);

    assert!(!app.should_quit());
    app.handle_key(Key::Ctrl('c'));
    assert!(app.should_quit());

    drop(app);
    store.close()?;
    let _ = fs::remove_dir_all(&root);
    Ok(())
}

#[test]
fn closed_store_reports_in_banner() -> Result<()> {
    let root = unique_root("closed");
    let store = open_store(&root)?;
    store.create_bucket("b")?;
    let mut app = App::new(store.clone(), DisplayMode::Raw)?;

    store.close()?;
    app.handle_key(Key::Ctrl('t'));
    type_text(&mut app, "new");
    app.handle_key(Key::Enter);
    assert_eq!(app.state(), UiState::CreateBucket);
    assert_eq!(app.error(), Some("database is not open"));

    let _ = fs::remove_dir_all(&root);
    Ok(())
}
