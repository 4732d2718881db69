//! Error taxonomy shared by the store, rename operations and the registry.
//!
//! Engine failures are folded into one opaque variant; the presentation
//! layers only branch on the typed variants (see `is_not_found`, `is_conflict`,
//! `is_invalid`).

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Result alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("bucket {0} not found")]
    BucketNotFound(String),

    #[error("key {key} not found in bucket {bucket}")]
    KeyNotFound { bucket: String, key: String },

    #[error("name {0} already exists")]
    NameCollision(String),

    #[error("invalid name: {0}")]
    InvalidName(&'static str),

    #[error("database is not open")]
    NotOpen,

    #[error("database {0} is already open")]
    AlreadyOpen(String),

    #[error("database {0} not found")]
    NotFound(String),

    #[error("timed out after {timeout:?} waiting for the lock on {}", path.display())]
    LockTimeout { path: PathBuf, timeout: Duration },

    #[error("engine error: {0}")]
    Engine(#[from] redb::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Missing bucket, key or registry entry.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::BucketNotFound(_) | Error::KeyNotFound { .. } | Error::NotFound(_)
        )
    }

    /// The request conflicts with an existing name.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::NameCollision(_) | Error::AlreadyOpen(_))
    }

    /// The caller supplied an unusable argument.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Error::InvalidName(_))
    }
}

// `?` performs a single `From` hop, so each engine error type is routed
// through `redb::Error` explicitly.
macro_rules! engine_error {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Error {
                fn from(e: $ty) -> Self {
                    Error::Engine(e.into())
                }
            }
        )*
    };
}

engine_error!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert!(Error::BucketNotFound("b".into()).is_not_found());
        assert!(Error::KeyNotFound {
            bucket: "b".into(),
            key: "k".into()
        }
        .is_not_found());
        assert!(Error::NotFound("main".into()).is_not_found());
        assert!(Error::NameCollision("x".into()).is_conflict());
        assert!(Error::AlreadyOpen("main".into()).is_conflict());
        assert!(Error::InvalidName("empty").is_invalid());
        assert!(!Error::NotOpen.is_not_found());
        assert!(!Error::NotOpen.is_conflict());
    }

    #[test]
    fn display_names_the_subject() {
        let msg = Error::KeyNotFound {
            bucket: "users".into(),
            key: "alice".into(),
        }
        .to_string();
        assert!(msg.contains("users"));
        assert!(msg.contains("alice"));

        let msg = Error::LockTimeout {
            path: PathBuf::from("/tmp/x.db"),
            timeout: Duration::from_millis(250),
        }
        .to_string();
        assert!(msg.contains("/tmp/x.db"));
    }
}
