//! store/open: opening a database file with a bounded wait for its lock.

use std::io;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use redb::{Database, DatabaseError};

use crate::config::BrowserConfig;
use crate::error::{Error, Result};

use super::core::Store;

/// Poll interval while another holder keeps the file locked.
const LOCK_POLL: Duration = Duration::from_millis(25);

impl Store {
    /// Open (or create) the database at `path` using BV_* environment config.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, &BrowserConfig::from_env())
    }

    pub fn open_with_config(path: impl AsRef<Path>, cfg: &BrowserConfig) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            if !cfg.create_if_missing {
                return Err(Error::Io(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("file does not exist: {}", path.display()),
                )));
            }
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        let db = open_with_timeout(path, cfg.open_timeout())?;
        Ok(Self::from_database(path.to_path_buf(), db))
    }
}

/// `Database::create` fails fast with `DatabaseAlreadyOpen` while another
/// handle holds the file; retry until `timeout` has elapsed.
fn open_with_timeout(path: &Path, timeout: Duration) -> Result<Database> {
    let deadline = Instant::now() + timeout;
    loop {
        match Database::create(path) {
            Ok(db) => return Ok(db),
            Err(DatabaseError::DatabaseAlreadyOpen) => {
                let now = Instant::now();
                if now >= deadline {
                    return Err(Error::LockTimeout {
                        path: path.to_path_buf(),
                        timeout,
                    });
                }
                thread::sleep(LOCK_POLL.min(deadline - now));
            }
            Err(e) => return Err(e.into()),
        }
    }
}
