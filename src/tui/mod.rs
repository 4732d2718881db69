//! tui: interactive terminal browser over one `Store`.
//!
//! - keymap: key events and bindings
//! - input:  single-line text field
//! - state:  the nine screens
//! - app:    state machine (one store call per transition)
//! - view:   App -> styled lines
//! - term:   crossterm backend

pub mod app;
pub mod input;
pub mod keymap;
pub mod state;
pub mod term;
pub mod view;

pub use app::{App, Row};
pub use keymap::{Action, Key, KeyMap};
pub use state::UiState;
pub use term::run;
