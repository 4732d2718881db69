use anyhow::Result;
use std::path::PathBuf;

use bucketview::BrowserConfig;

use super::util::open_existing;

pub fn exec(cfg: &BrowserConfig, path: PathBuf, json: bool) -> Result<()> {
    let store = open_existing(cfg, &path)?;
    let buckets = store.list_buckets()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&buckets)?);
    } else if buckets.is_empty() {
        println!("(no buckets)");
    } else {
        for b in &buckets {
            println!("{}", b);
        }
    }
    store.close()?;
    Ok(())
}
