//! tui/app: terminal UI state machine.
//!
//! `App::handle_key` interprets one key in the current `UiState`, issues at
//! most one store/rename call, and on success re-reads the affected listing.
//! Failures become the inline error banner and leave the state unchanged.

use std::sync::Arc;

use crate::display::DisplayMode;
use crate::error::{Error, Result};
use crate::store::Store;

use super::input::TextInput;
use super::keymap::{Action, Key, KeyMap};
use super::state::UiState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub key: String,
    pub value: Vec<u8>,
}

pub struct App {
    store: Arc<Store>,
    keymap: KeyMap,
    state: UiState,

    buckets: Vec<String>,
    active_tab: usize,
    current_bucket: Option<String>,
    rows: Vec<Row>,
    selected: usize,

    input: TextInput,
    // subject of the edit/delete screen in progress
    pending_bucket: String,
    pending_key: String,

    display_mode: DisplayMode,
    settings_selection: usize,
    show_help: bool,
    error: Option<String>,
    quit: bool,
    width: u16,
    height: u16,
}

impl App {
    /// Build the UI over an open store and load the bucket list.
    pub fn new(store: Arc<Store>, display_mode: DisplayMode) -> Result<Self> {
        let mut app = Self {
            store,
            keymap: KeyMap::default(),
            state: UiState::BucketList,
            buckets: Vec::new(),
            active_tab: 0,
            current_bucket: None,
            rows: Vec::new(),
            selected: 0,
            input: TextInput::new(),
            pending_bucket: String::new(),
            pending_key: String::new(),
            display_mode,
            settings_selection: 0,
            show_help: false,
            error: None,
            quit: false,
            width: 80,
            height: 24,
        };
        app.reload_buckets()?;
        Ok(app)
    }

    // -------------------- accessors (used by the view) --------------------

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn buckets(&self) -> &[String] {
        &self.buckets
    }

    pub fn active_tab(&self) -> usize {
        self.active_tab
    }

    pub fn current_bucket(&self) -> Option<&str> {
        self.current_bucket.as_deref()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_key(&self) -> Option<&str> {
        self.rows.get(self.selected).map(|r| r.key.as_str())
    }

    pub fn input(&self) -> &TextInput {
        &self.input
    }

    pub fn pending_bucket(&self) -> &str {
        &self.pending_bucket
    }

    pub fn pending_key(&self) -> &str {
        &self.pending_key
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn settings_selection(&self) -> usize {
        self.settings_selection
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    // -------------------- input dispatch --------------------

    pub fn handle_key(&mut self, key: Key) {
        let action = self.keymap.action(key);

        // global keys
        match action {
            Some(Action::Quit) => {
                self.quit = true;
                return;
            }
            Some(Action::Esc) => {
                self.state = UiState::BucketList;
                self.error = None;
                return;
            }
            Some(Action::Help) if !self.state.is_text_entry() => {
                self.show_help = !self.show_help;
                return;
            }
            _ => {}
        }

        let outcome = match self.state {
            UiState::BucketList => self.on_bucket_list(action),
            UiState::CreateBucket => self.on_create_bucket(key, action),
            UiState::CreateKey => self.on_create_key(key, action),
            UiState::EditValue => self.on_edit_value(key, action),
            UiState::EditBucketName => self.on_edit_bucket_name(key, action),
            UiState::EditKeyName => self.on_edit_key_name(key, action),
            UiState::ConfirmDeleteKey => self.on_confirm_delete_key(action),
            UiState::ConfirmDeleteBucket => self.on_confirm_delete_bucket(action),
            UiState::Settings => self.on_settings(action),
        };

        if let Err(e) = outcome {
            self.error = Some(e.to_string());
        }
    }

    fn on_bucket_list(&mut self, action: Option<Action>) -> Result<()> {
        let Some(action) = action else {
            return Ok(());
        };
        let have_bucket = self.current_bucket.is_some();
        let have_row = have_bucket && !self.rows.is_empty();

        match action {
            Action::NewBucket => self.begin_input(UiState::CreateBucket, ""),
            Action::NewKey if have_bucket => self.begin_input(UiState::CreateKey, ""),
            Action::Settings => {
                self.settings_selection = self.display_mode.index();
                self.state = UiState::Settings;
            }
            Action::EditKey if have_row => {
                self.pending_key = self.rows[self.selected].key.clone();
                let key = self.pending_key.clone();
                self.begin_input(UiState::EditKeyName, &key);
            }
            Action::EditBucket if have_bucket => {
                self.pending_bucket = self.current_bucket.clone().unwrap_or_default();
                let bucket = self.pending_bucket.clone();
                self.begin_input(UiState::EditBucketName, &bucket);
            }
            Action::Delete if have_row => {
                self.pending_key = self.rows[self.selected].key.clone();
                self.state = UiState::ConfirmDeleteKey;
            }
            Action::DeleteBucket if have_bucket => {
                self.pending_bucket = self.current_bucket.clone().unwrap_or_default();
                self.state = UiState::ConfirmDeleteBucket;
            }
            Action::PrevTab | Action::Left if have_bucket => {
                self.switch_tab(self.active_tab.saturating_sub(1))?;
            }
            Action::NextTab | Action::Right if have_bucket => {
                let last = self.buckets.len() - 1;
                self.switch_tab((self.active_tab + 1).min(last))?;
            }
            Action::SelectTab(i) if i < self.buckets.len() => self.switch_tab(i)?,
            Action::Up => self.selected = self.selected.saturating_sub(1),
            Action::Down => {
                if self.selected + 1 < self.rows.len() {
                    self.selected += 1;
                }
            }
            Action::Enter if have_row => {
                let bucket = self.current_bucket.clone().unwrap_or_default();
                let key = self.rows[self.selected].key.clone();
                let value = self
                    .store
                    .get_value(&bucket, &key)?
                    .ok_or(Error::KeyNotFound {
                        bucket,
                        key: key.clone(),
                    })?;
                // non-UTF-8 values are not editable as text
                let Ok(text) = String::from_utf8(value) else {
                    self.error = Some(format!("value of {key} is not UTF-8 text"));
                    return Ok(());
                };
                self.pending_key = key;
                self.begin_input(UiState::EditValue, &text);
            }
            _ => {}
        }
        Ok(())
    }

    fn on_create_bucket(&mut self, key: Key, action: Option<Action>) -> Result<()> {
        match action {
            // ctrl+t toggles the form closed
            Some(Action::NewBucket) => self.state = UiState::BucketList,
            Some(Action::Enter) => {
                let name = self.input.value();
                if !name.is_empty() {
                    self.store.create_bucket(&name)?;
                    self.current_bucket = Some(name);
                    self.finish();
                    self.reload_buckets()?;
                }
            }
            _ => {
                self.input.handle_key(key);
            }
        }
        Ok(())
    }

    fn on_create_key(&mut self, key: Key, action: Option<Action>) -> Result<()> {
        if action != Some(Action::Enter) {
            self.input.handle_key(key);
            return Ok(());
        }
        let name = self.input.value();
        if name.is_empty() {
            return Ok(());
        }
        // checked against the listing on screen so an existing value is not overwritten
        if self.rows.iter().any(|r| r.key == name) {
            return Err(Error::NameCollision(name));
        }
        let bucket = self.current_bucket.clone().unwrap_or_default();
        self.store.put_value(&bucket, &name, b"")?;
        self.finish();
        self.reload_rows()?;
        self.select_key(&name);
        Ok(())
    }

    fn on_edit_value(&mut self, key: Key, action: Option<Action>) -> Result<()> {
        if action != Some(Action::Enter) {
            self.input.handle_key(key);
            return Ok(());
        }
        let bucket = self.current_bucket.clone().unwrap_or_default();
        let value = self.input.value();
        self.store.put_value(&bucket, &self.pending_key, value.as_bytes())?;
        self.finish();
        self.reload_rows()
    }

    fn on_edit_bucket_name(&mut self, key: Key, action: Option<Action>) -> Result<()> {
        if action != Some(Action::Enter) {
            self.input.handle_key(key);
            return Ok(());
        }
        let new_name = self.input.value();
        if new_name.is_empty() {
            return Ok(());
        }
        if new_name == self.pending_bucket {
            self.finish();
            return Ok(());
        }
        self.store.rename_bucket(&self.pending_bucket, &new_name)?;
        self.current_bucket = Some(new_name);
        self.finish();
        self.reload_buckets()
    }

    fn on_edit_key_name(&mut self, key: Key, action: Option<Action>) -> Result<()> {
        if action != Some(Action::Enter) {
            self.input.handle_key(key);
            return Ok(());
        }
        let new_key = self.input.value();
        if new_key.is_empty() {
            return Ok(());
        }
        if new_key == self.pending_key {
            self.finish();
            return Ok(());
        }
        let bucket = self.current_bucket.clone().unwrap_or_default();
        self.store.rename_key(&bucket, &self.pending_key, &new_key)?;
        self.finish();
        self.reload_rows()?;
        self.select_key(&new_key);
        Ok(())
    }

    fn on_confirm_delete_key(&mut self, action: Option<Action>) -> Result<()> {
        if action == Some(Action::Enter) {
            let bucket = self.current_bucket.clone().unwrap_or_default();
            self.store.delete_value(&bucket, &self.pending_key)?;
            self.pending_key.clear();
            self.finish();
            self.reload_rows()?;
        }
        Ok(())
    }

    fn on_confirm_delete_bucket(&mut self, action: Option<Action>) -> Result<()> {
        if action == Some(Action::Enter) {
            self.store.delete_bucket(&self.pending_bucket)?;
            self.pending_bucket.clear();
            // the tab index now points at the neighbour; reload_buckets clamps it
            self.current_bucket = None;
            self.finish();
            self.reload_buckets()?;
        }
        Ok(())
    }

    fn on_settings(&mut self, action: Option<Action>) -> Result<()> {
        match action {
            Some(Action::Up) => self.settings_selection = self.settings_selection.saturating_sub(1),
            Some(Action::Down) => {
                if self.settings_selection + 1 < DisplayMode::ALL.len() {
                    self.settings_selection += 1;
                }
            }
            Some(Action::Enter) => {
                // values are kept as bytes; only the rendering changes
                self.display_mode = DisplayMode::from_index(self.settings_selection);
                self.finish();
            }
            _ => {}
        }
        Ok(())
    }

    // -------------------- helpers --------------------

    fn begin_input(&mut self, state: UiState, initial: &str) {
        self.input.set_value(initial);
        self.state = state;
    }

    /// Back to the list after a successful transition.
    fn finish(&mut self) {
        self.state = UiState::BucketList;
        self.error = None;
    }

    fn switch_tab(&mut self, i: usize) -> Result<()> {
        if i == self.active_tab && self.current_bucket.as_deref() == self.buckets.get(i).map(String::as_str) {
            return Ok(());
        }
        self.active_tab = i;
        self.current_bucket = self.buckets.get(i).cloned();
        self.selected = 0;
        self.reload_rows()
    }

    fn select_key(&mut self, key: &str) {
        if let Some(i) = self.rows.iter().position(|r| r.key == key) {
            self.selected = i;
        }
    }

    /// Re-read bucket names, keep the current bucket active if it still
    /// exists, then refresh its rows.
    fn reload_buckets(&mut self) -> Result<()> {
        self.buckets = self.store.list_buckets()?;
        if self.buckets.is_empty() {
            self.active_tab = 0;
            self.current_bucket = None;
            self.rows.clear();
            self.selected = 0;
            return Ok(());
        }

        if let Some(cur) = self.current_bucket.as_deref() {
            if let Some(i) = self.buckets.iter().position(|b| b == cur) {
                if i != self.active_tab {
                    self.selected = 0;
                }
                self.active_tab = i;
            }
        }
        self.active_tab = self.active_tab.min(self.buckets.len() - 1);
        self.current_bucket = Some(self.buckets[self.active_tab].clone());
        self.reload_rows()
    }

    fn reload_rows(&mut self) -> Result<()> {
        self.rows = match self.current_bucket.as_deref() {
            Some(b) => self
                .store
                .list_entries(b)?
                .into_iter()
                .map(|(key, value)| Row { key, value })
                .collect(),
            None => Vec::new(),
        };
        if self.selected >= self.rows.len() {
            self.selected = self.rows.len().saturating_sub(1);
        }
        Ok(())
    }
}
