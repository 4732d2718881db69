use anyhow::Result;
use std::path::PathBuf;

use bucketview::BrowserConfig;

use super::util::open_existing;

pub fn exec(
    cfg: &BrowserConfig,
    path: PathBuf,
    bucket: String,
    from: String,
    to: String,
) -> Result<()> {
    let store = open_existing(cfg, &path)?;
    store.rename_key(&bucket, &from, &to)?;
    store.close()?;
    println!("OK key renamed in '{}': '{}' -> '{}'", bucket, from, to);
    Ok(())
}
