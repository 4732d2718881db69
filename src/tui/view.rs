//! tui/view: renders `App` into styled text lines.
//!
//! The backend only paints what this returns, so everything visible is
//! testable without a terminal.

use crate::display::{format_value, DisplayMode};

use super::app::App;
use super::state::UiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Normal,
    Title,
    Error,
    Selected,
    Dim,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String,
    pub tone: Tone,
}

impl Line {
    fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }

    fn normal(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Normal)
    }

    fn blank() -> Self {
        Self::normal("")
    }
}

// title + blank + tabs + blank + mode + blank + header + rule + help block
const CHROME_ROWS: usize = 12;
const KEY_COL_MIN: usize = 12;

pub fn render(app: &App) -> Vec<Line> {
    let mut out = Vec::new();
    out.push(Line::new(
        format!("bucketview - {}", app.store().path().display()),
        Tone::Title,
    ));
    out.push(Line::blank());

    if let Some(err) = app.error() {
        out.push(Line::new(format!("Error: {}", err), Tone::Error));
        out.push(Line::blank());
    }

    match app.state() {
        UiState::BucketList => bucket_list(app, &mut out),
        UiState::CreateBucket => form(
            &mut out,
            "Create new bucket:".to_string(),
            app.input().render("Enter bucket name..."),
            "Press Enter to create, Esc to cancel",
        ),
        UiState::CreateKey => form(
            &mut out,
            format!("Create new key in bucket '{}':", current(app)),
            app.input().render("Enter key name..."),
            "Press Enter to create, Esc to cancel",
        ),
        UiState::EditValue => form(
            &mut out,
            format!(
                "Edit value of key '{}' in bucket '{}':",
                app.pending_key(),
                current(app)
            ),
            app.input().render(""),
            "Press Enter to save, Esc to cancel",
        ),
        UiState::EditBucketName => form(
            &mut out,
            format!("Edit bucket name '{}':", app.pending_bucket()),
            app.input().render(""),
            "Press Enter to save, Esc to cancel",
        ),
        UiState::EditKeyName => form(
            &mut out,
            format!(
                "Edit key name '{}' in bucket '{}':",
                app.pending_key(),
                current(app)
            ),
            app.input().render(""),
            "Press Enter to save, Esc to cancel",
        ),
        UiState::ConfirmDeleteKey => {
            out.push(Line::new("DELETE CONFIRMATION", Tone::Error));
            out.push(Line::blank());
            out.push(Line::normal(format!(
                "Are you sure you want to delete key '{}' from bucket '{}'?",
                app.pending_key(),
                current(app)
            )));
            out.push(Line::blank());
            out.push(Line::normal("This action cannot be undone."));
            out.push(Line::blank());
            out.push(Line::new("Press Enter to confirm deletion, Esc to cancel", Tone::Dim));
        }
        UiState::ConfirmDeleteBucket => {
            out.push(Line::new("DELETE BUCKET CONFIRMATION", Tone::Error));
            out.push(Line::blank());
            out.push(Line::normal(format!(
                "Are you sure you want to delete bucket '{}'?",
                app.pending_bucket()
            )));
            out.push(Line::blank());
            out.push(Line::normal(
                "This will permanently delete ALL keys and values in this bucket.",
            ));
            out.push(Line::normal("This action cannot be undone."));
            out.push(Line::blank());
            out.push(Line::new("Press Enter to confirm deletion, Esc to cancel", Tone::Dim));
        }
        UiState::Settings => settings(app, &mut out),
    }

    out.push(Line::blank());
    if app.show_help() {
        for l in app.keymap().full_help() {
            out.push(Line::new(l, Tone::Dim));
        }
    } else {
        out.push(Line::new(" Press ? for help ", Tone::Dim));
    }
    out
}

fn current(app: &App) -> &str {
    app.current_bucket().unwrap_or("")
}

fn form(out: &mut Vec<Line>, prompt: String, field: String, hint: &str) {
    out.push(Line::normal(prompt));
    out.push(Line::blank());
    out.push(Line::normal(field));
    out.push(Line::blank());
    out.push(Line::new(hint, Tone::Dim));
}

fn bucket_list(app: &App, out: &mut Vec<Line>) {
    if app.buckets().is_empty() {
        out.push(Line::normal(
            "No buckets found. Press Ctrl+T to create a new bucket.",
        ));
        return;
    }

    let tabs: Vec<String> = app
        .buckets()
        .iter()
        .enumerate()
        .map(|(i, b)| {
            if i == app.active_tab() {
                format!("[{}]", b)
            } else {
                format!(" {} ", b)
            }
        })
        .collect();
    out.push(Line::new(tabs.join(" "), Tone::Title));
    out.push(Line::blank());
    out.push(Line::normal(format!("Display Mode: {}", app.display_mode())));
    out.push(Line::blank());

    let (width, height) = app.size();
    let width = (width as usize).saturating_sub(4).max(2 * KEY_COL_MIN);
    let key_w = (width / 3).max(KEY_COL_MIN);
    let val_w = width.saturating_sub(key_w + 3);

    out.push(Line::new(
        format!("{:<kw$} | {}", "Key", "Value", kw = key_w),
        Tone::Title,
    ));
    out.push(Line::new("-".repeat(key_w + 3 + val_w), Tone::Dim));

    let rows = app.rows();
    if rows.is_empty() {
        out.push(Line::new("(empty bucket)", Tone::Dim));
        return;
    }

    let visible = (height as usize).saturating_sub(CHROME_ROWS).max(1);
    let (start, end) = window(app.selected(), rows.len(), visible);
    for (i, row) in rows.iter().enumerate().take(end).skip(start) {
        let text = format!(
            "{:<kw$} | {}",
            truncate(&row.key, key_w),
            truncate(&format_value(&row.value, app.display_mode()), val_w),
            kw = key_w
        );
        let tone = if i == app.selected() {
            Tone::Selected
        } else {
            Tone::Normal
        };
        out.push(Line::new(text, tone));
    }
    if end - start < rows.len() {
        out.push(Line::new(
            format!("{}-{} of {}", start + 1, end, rows.len()),
            Tone::Dim,
        ));
    }
}

fn settings(app: &App, out: &mut Vec<Line>) {
    out.push(Line::normal("Settings - Data Display Mode:"));
    out.push(Line::blank());
    for (i, mode) in DisplayMode::ALL.iter().enumerate() {
        let selected = i == app.settings_selection();
        let prefix = if selected { "→ " } else { "  " };
        let marker = if *mode == app.display_mode() {
            " (current)"
        } else {
            ""
        };
        let tone = if selected { Tone::Selected } else { Tone::Normal };
        out.push(Line::new(format!("{}{}{}", prefix, mode, marker), tone));
    }
    out.push(Line::blank());
    out.push(Line::new(
        "Use ↑/↓ to navigate, Enter to select, Esc to cancel",
        Tone::Dim,
    ));
}

/// Visible row range `[start, end)` that keeps `selected` on screen.
pub(crate) fn window(selected: usize, len: usize, visible: usize) -> (usize, usize) {
    if len <= visible {
        return (0, len);
    }
    let start = selected.saturating_sub(visible - 1).min(len - visible);
    (start, start + visible)
}

fn truncate(s: &str, max: usize) -> String {
    // values may contain newlines; keep the table on one line per row
    let flat: String = s
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    if flat.chars().count() <= max {
        return flat;
    }
    if max <= 3 {
        return flat.chars().take(max).collect();
    }
    let mut t: String = flat.chars().take(max - 3).collect();
    t.push_str("...");
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_follows_selection() {
        assert_eq!(window(0, 5, 10), (0, 5));
        assert_eq!(window(0, 100, 10), (0, 10));
        assert_eq!(window(9, 100, 10), (0, 10));
        assert_eq!(window(10, 100, 10), (1, 11));
        assert_eq!(window(99, 100, 10), (90, 100));
    }

    #[test]
    fn truncate_flattens_and_shortens() {
        assert_eq!(truncate("a\nb", 10), "a b");
        assert_eq!(truncate("abcdefghij", 6), "abc...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }
}
