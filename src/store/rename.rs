//! store/rename: rename-by-copy for buckets and keys.
//!
//! The engine has no rename primitive. Both operations create the new name,
//! copy, and delete the old name inside one write transaction, so readers
//! see either the old name or the new one, never both and never neither.

use redb::ReadableTable;

use crate::error::{Error, Result};

use super::core::{bucket_def, bucket_exists_rw, open_bucket_rw, Store};

impl Store {
    pub fn rename_bucket(&self, old: &str, new: &str) -> Result<()> {
        if new.is_empty() {
            return Err(Error::InvalidName("new bucket name is empty"));
        }
        if old == new {
            return self.ensure_open();
        }

        self.update(|tx| {
            if !bucket_exists_rw(tx, old)? {
                return Err(Error::BucketNotFound(old.to_string()));
            }
            if bucket_exists_rw(tx, new)? {
                return Err(Error::NameCollision(new.to_string()));
            }

            {
                let src = tx.open_table(bucket_def(old))?;
                let mut dst = tx.open_table(bucket_def(new))?;
                for item in src.iter()? {
                    let (k, v) = item?;
                    dst.insert(k.value(), v.value())?;
                }
            }

            tx.delete_table(bucket_def(old))?;
            Ok(())
        })
    }

    pub fn rename_key(&self, bucket: &str, old: &str, new: &str) -> Result<()> {
        if new.is_empty() {
            return Err(Error::InvalidName("new key is empty"));
        }
        if old == new {
            return self.ensure_open();
        }

        self.update(|tx| {
            let mut table = open_bucket_rw(tx, bucket)?;

            let value = match table.get(old)? {
                Some(g) => g.value().to_vec(),
                None => {
                    return Err(Error::KeyNotFound {
                        bucket: bucket.to_string(),
                        key: old.to_string(),
                    })
                }
            };
            let taken = table.get(new)?.is_some();
            if taken {
                return Err(Error::NameCollision(new.to_string()));
            }

            table.insert(new, value.as_slice())?;
            table.remove(old)?;
            Ok(())
        })
    }
}
