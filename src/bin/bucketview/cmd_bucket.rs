use anyhow::Result;
use std::path::PathBuf;

use bucketview::{BrowserConfig, Store};

use super::util::open_existing;

pub fn exec_create(cfg: &BrowserConfig, path: PathBuf, name: String) -> Result<()> {
    // creating a bucket may also create the file
    let store = Store::open_with_config(&path, cfg)?;
    store.create_bucket(&name)?;
    store.close()?;
    println!("OK bucket created: '{}'", name);
    Ok(())
}

pub fn exec_delete(cfg: &BrowserConfig, path: PathBuf, name: String) -> Result<()> {
    let store = open_existing(cfg, &path)?;
    store.delete_bucket(&name)?;
    store.close()?;
    println!("OK bucket deleted: '{}'", name);
    Ok(())
}

pub fn exec_rename(cfg: &BrowserConfig, path: PathBuf, from: String, to: String) -> Result<()> {
    let store = open_existing(cfg, &path)?;
    store.rename_bucket(&from, &to)?;
    store.close()?;
    println!("OK bucket renamed: '{}' -> '{}'", from, to);
    Ok(())
}
