// Core
pub mod config;
pub mod display;
pub mod error;
pub mod registry;
pub mod store; // src/store/{mod,core,open,kv,rename}.rs

// Presentation
pub mod http; // src/http/{mod,route,api,server}.rs
pub mod tui;  // src/tui/{mod,keymap,input,state,app,view,term}.rs

pub use config::BrowserConfig;
pub use display::{format_value, DisplayMode};
pub use error::{Error, Result};
pub use registry::Registry;
pub use store::Store;
