//! tui/term: crossterm backend (raw mode, event loop, painting).

use std::io::{self, Stdout, Write};

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};

use super::app::App;
use super::keymap::Key;
use super::view::{self, Tone};

/// Restores the terminal on drop, including on early return and panic unwind.
struct TerminalGuard {
    out: Stdout,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("enable raw mode")?;
        let mut out = io::stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(e).context("enter alternate screen");
        }
        Ok(Self { out })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Run the interactive session until the user quits.
pub fn run(app: &mut App) -> Result<()> {
    log::info!("tui: session start for {}", app.store().path().display());
    let mut guard = TerminalGuard::enter()?;

    if let Ok((w, h)) = terminal::size() {
        app.resize(w, h);
    }

    while !app.should_quit() {
        draw(&mut guard.out, app)?;
        match event::read().context("read terminal event")? {
            Event::Key(ev) => {
                if let Some(key) = translate(ev) {
                    app.handle_key(key);
                }
            }
            Event::Resize(w, h) => app.resize(w, h),
            _ => {}
        }
    }

    drop(guard);
    log::info!("tui: session end");
    Ok(())
}

fn draw(out: &mut Stdout, app: &App) -> Result<()> {
    queue!(out, Clear(ClearType::All))?;
    let (_, height) = app.size();
    for (row, line) in view::render(app).iter().enumerate() {
        let y = row as u16 + 1;
        if y >= height {
            break;
        }
        queue!(out, MoveTo(2, y))?;
        match line.tone {
            Tone::Normal => queue!(out, Print(&line.text))?,
            Tone::Title => queue!(
                out,
                SetAttribute(Attribute::Bold),
                SetForegroundColor(Color::Blue),
                Print(&line.text),
                SetAttribute(Attribute::Reset),
                ResetColor
            )?,
            Tone::Error => queue!(
                out,
                SetForegroundColor(Color::Red),
                Print(&line.text),
                ResetColor
            )?,
            Tone::Selected => queue!(
                out,
                SetAttribute(Attribute::Reverse),
                Print(&line.text),
                SetAttribute(Attribute::Reset)
            )?,
            Tone::Dim => queue!(
                out,
                SetForegroundColor(Color::DarkGrey),
                Print(&line.text),
                ResetColor
            )?,
        }
    }
    out.flush()?;
    Ok(())
}

/// Map a crossterm key event to a `Key`. Releases and repeats are dropped.
pub(crate) fn translate(ev: KeyEvent) -> Option<Key> {
    if ev.kind != KeyEventKind::Press {
        return None;
    }
    let ctrl = ev.modifiers.contains(KeyModifiers::CONTROL);
    let key = match ev.code {
        KeyCode::Char(c) if ctrl => Key::Ctrl(c.to_ascii_lowercase()),
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Tab if ev.modifiers.contains(KeyModifiers::SHIFT) => Key::BackTab,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        _ => return None,
    };
    Some(key)
}
