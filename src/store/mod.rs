//! store: thin adapter over one redb database file.
//!
//! - core:   `Store`, open/closed state, scoped `view`/`update` transactions
//! - open:   open with a bounded wait for the file lock
//! - kv:     bucket and key/value primitives
//! - rename: rename-by-copy for buckets and keys

mod core;
mod kv;
mod open;
mod rename;

pub use self::core::Store;
