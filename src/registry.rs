//! registry: logical name -> open `Store`.
//!
//! The registry owns the lifecycle of every store registered in it: `close`
//! and `close_all` close the underlying database, so handles previously
//! returned by `get` start failing with `NotOpen`.
//!
//! The map lock is never held while a database is being opened or used.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::BrowserConfig;
use crate::error::{Error, Result};
use crate::store::Store;

pub struct Registry {
    cfg: BrowserConfig,
    databases: RwLock<BTreeMap<String, Arc<Store>>>,
}

impl Registry {
    /// Empty registry; stores are opened with `cfg`.
    pub fn new(cfg: BrowserConfig) -> Self {
        Self {
            cfg,
            databases: RwLock::new(BTreeMap::new()),
        }
    }

    /// Registry with one entry already opened.
    pub fn with_default(name: &str, path: impl AsRef<Path>, cfg: BrowserConfig) -> Result<Self> {
        let registry = Self::new(cfg);
        registry.open(name, path)?;
        Ok(registry)
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.cfg
    }

    /// Open the database at `path` and register it as `name`.
    pub fn open(&self, name: &str, path: impl AsRef<Path>) -> Result<Arc<Store>> {
        if name.is_empty() {
            return Err(Error::InvalidName("database name is empty"));
        }
        if self.databases.read().contains_key(name) {
            return Err(Error::AlreadyOpen(name.to_string()));
        }

        // may block up to the open timeout; done without the map lock
        let store = Arc::new(Store::open_with_config(path, &self.cfg)?);

        let mut map = self.databases.write();
        if map.contains_key(name) {
            // lost a race with a concurrent open of the same name
            drop(map);
            store.close()?;
            return Err(Error::AlreadyOpen(name.to_string()));
        }
        map.insert(name.to_string(), Arc::clone(&store));
        Ok(store)
    }

    pub fn get(&self, name: &str) -> Result<Arc<Store>> {
        self.databases
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    /// Close the database registered as `name` and forget it.
    pub fn close(&self, name: &str) -> Result<()> {
        let store = self
            .databases
            .write()
            .remove(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        store.close()
    }

    /// Registered names, sorted.
    pub fn list(&self) -> Vec<String> {
        self.databases.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.databases.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.databases.read().is_empty()
    }

    /// Close every registered database. All stores are attempted; the first
    /// failure is returned.
    pub fn close_all(&self) -> Result<()> {
        let drained: Vec<Arc<Store>> = {
            let mut map = self.databases.write();
            std::mem::take(&mut *map).into_values().collect()
        };

        let mut first_err = None;
        for store in drained {
            if let Err(e) = store.close() {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
