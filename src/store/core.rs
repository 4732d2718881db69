//! store/core: the `Store` handle, its open/closed state and scoped transactions.
//!
//! A bucket is a redb table with `&str` keys and `&[u8]` values. Every public
//! operation runs inside exactly one of `view` (read-only) or `update`
//! (read-write); `update` commits when the closure returns `Ok` and aborts on
//! every `Err` path, so no transaction outlives the call.

use std::fmt;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use redb::{
    Database, ReadOnlyTable, ReadTransaction, Table, TableDefinition, TableError, TableHandle,
    WriteTransaction,
};

use crate::error::{Error, Result};

pub(crate) type BucketDef<'a> = TableDefinition<'a, &'static str, &'static [u8]>;

/// Table definition for a bucket. Callers must reject empty names first:
/// redb refuses empty table names.
pub(crate) fn bucket_def(name: &str) -> BucketDef<'_> {
    TableDefinition::new(name)
}

pub struct Store {
    pub(crate) path: PathBuf,
    // None once closed. Readers only contend with `close`.
    pub(crate) db: RwLock<Option<Database>>,
}

impl Store {
    pub(crate) fn from_database(path: PathBuf, db: Database) -> Self {
        Self {
            path,
            db: RwLock::new(Some(db)),
        }
    }

    /// Filesystem path the store was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.db.read().is_some()
    }

    /// Close the database and release its file lock. Waits for in-flight
    /// operations; every later call (including a second `close`) fails with `NotOpen`.
    pub fn close(&self) -> Result<()> {
        let mut guard = self.db.write();
        match guard.take() {
            Some(db) => {
                drop(db);
                Ok(())
            }
            None => Err(Error::NotOpen),
        }
    }

    pub(crate) fn ensure_open(&self) -> Result<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(Error::NotOpen)
        }
    }

    /// Run `f` inside one read-only transaction.
    pub(crate) fn view<T>(&self, f: impl FnOnce(&ReadTransaction) -> Result<T>) -> Result<T> {
        let guard = self.db.read();
        let db = guard.as_ref().ok_or(Error::NotOpen)?;
        let tx = db.begin_read()?;
        f(&tx)
    }

    /// Run `f` inside one read-write transaction: commit on `Ok`, abort on `Err`.
    pub(crate) fn update<T>(&self, f: impl FnOnce(&WriteTransaction) -> Result<T>) -> Result<T> {
        let guard = self.db.read();
        let db = guard.as_ref().ok_or(Error::NotOpen)?;
        let tx = db.begin_write()?;
        match f(&tx) {
            Ok(v) => {
                tx.commit()?;
                Ok(v)
            }
            Err(e) => {
                // the closure's error is the one the caller needs
                let _ = tx.abort();
                Err(e)
            }
        }
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("path", &self.path)
            .field("open", &self.is_open())
            .finish()
    }
}

// -------------------- bucket helpers --------------------

/// Open an existing bucket for reading.
pub(crate) fn open_bucket_ro(
    tx: &ReadTransaction,
    name: &str,
) -> Result<ReadOnlyTable<&'static str, &'static [u8]>> {
    if name.is_empty() {
        return Err(Error::BucketNotFound(String::new()));
    }
    match tx.open_table(bucket_def(name)) {
        Ok(t) => Ok(t),
        Err(TableError::TableDoesNotExist(_)) => Err(Error::BucketNotFound(name.to_string())),
        Err(e) => Err(e.into()),
    }
}

/// Whether a bucket exists, as seen by this write transaction.
pub(crate) fn bucket_exists_rw(tx: &WriteTransaction, name: &str) -> Result<bool> {
    if name.is_empty() {
        return Ok(false);
    }
    let found = tx.list_tables()?.any(|h| h.name() == name);
    Ok(found)
}

/// Open an existing bucket for writing. Unlike `WriteTransaction::open_table`
/// this never creates the bucket.
pub(crate) fn open_bucket_rw<'txn>(
    tx: &'txn WriteTransaction,
    name: &str,
) -> Result<Table<'txn, &'static str, &'static [u8]>> {
    if !bucket_exists_rw(tx, name)? {
        return Err(Error::BucketNotFound(name.to_string()));
    }
    Ok(tx.open_table(bucket_def(name))?)
}
