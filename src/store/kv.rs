//! store/kv: bucket and key/value primitives, one transaction each.

use redb::{ReadableTable, TableHandle};

use crate::error::{Error, Result};

use super::core::{bucket_def, open_bucket_ro, open_bucket_rw, Store};

impl Store {
    /// All bucket names, in the engine's (lexicographic) order.
    pub fn list_buckets(&self) -> Result<Vec<String>> {
        self.view(|tx| {
            let names = tx.list_tables()?.map(|h| h.name().to_string()).collect();
            Ok(names)
        })
    }

    pub fn bucket_exists(&self, name: &str) -> Result<bool> {
        self.view(|tx| match open_bucket_ro(tx, name) {
            Ok(_) => Ok(true),
            Err(Error::BucketNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        })
    }

    pub fn list_keys(&self, bucket: &str) -> Result<Vec<String>> {
        self.view(|tx| {
            let table = open_bucket_ro(tx, bucket)?;
            let mut keys = Vec::new();
            for item in table.iter()? {
                let (k, _) = item?;
                keys.push(k.value().to_string());
            }
            Ok(keys)
        })
    }

    /// Keys and values of a bucket, read in a single snapshot.
    pub fn list_entries(&self, bucket: &str) -> Result<Vec<(String, Vec<u8>)>> {
        self.view(|tx| {
            let table = open_bucket_ro(tx, bucket)?;
            let mut out = Vec::new();
            for item in table.iter()? {
                let (k, v) = item?;
                out.push((k.value().to_string(), v.value().to_vec()));
            }
            Ok(out)
        })
    }

    /// `Ok(None)` when the bucket exists but the key does not. An empty stored
    /// value comes back as `Ok(Some(vec![]))`.
    pub fn get_value(&self, bucket: &str, key: &str) -> Result<Option<Vec<u8>>> {
        self.view(|tx| {
            let table = open_bucket_ro(tx, bucket)?;
            let value = table.get(key)?.map(|g| g.value().to_vec());
            Ok(value)
        })
    }

    /// Create a bucket; succeeds if it already exists.
    pub fn create_bucket(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidName("bucket name is empty"));
        }
        self.update(|tx| {
            tx.open_table(bucket_def(name))?;
            Ok(())
        })
    }

    /// Delete a bucket and every entry in it.
    pub fn delete_bucket(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::BucketNotFound(String::new()));
        }
        self.update(|tx| {
            if !tx.delete_table(bucket_def(name))? {
                return Err(Error::BucketNotFound(name.to_string()));
            }
            Ok(())
        })
    }

    /// Insert or overwrite an entry. The bucket must already exist.
    pub fn put_value(&self, bucket: &str, key: &str, value: &[u8]) -> Result<()> {
        if key.is_empty() {
            return Err(Error::InvalidName("key is empty"));
        }
        self.update(|tx| {
            let mut table = open_bucket_rw(tx, bucket)?;
            table.insert(key, value)?;
            Ok(())
        })
    }

    /// Remove an entry; a missing key is not an error.
    pub fn delete_value(&self, bucket: &str, key: &str) -> Result<()> {
        self.update(|tx| {
            let mut table = open_bucket_rw(tx, bucket)?;
            table.remove(key)?;
            Ok(())
        })
    }
}
