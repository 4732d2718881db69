use anyhow::Result;
use std::path::PathBuf;

use bucketview::BrowserConfig;

use super::util::open_existing;

pub fn exec(cfg: &BrowserConfig, path: PathBuf, bucket: String, key: String) -> Result<()> {
    let store = open_existing(cfg, &path)?;
    store.delete_value(&bucket, &key)?;
    store.close()?;
    println!("OK del: '{}'/'{}'", bucket, key);
    Ok(())
}
