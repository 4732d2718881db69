use anyhow::Result;
use std::path::PathBuf;

use bucketview::BrowserConfig;

use super::util::open_existing;

pub fn exec(cfg: &BrowserConfig, path: PathBuf, bucket: String, json: bool) -> Result<()> {
    let store = open_existing(cfg, &path)?;
    let keys = store.list_keys(&bucket)?;
    if json {
        let obj = serde_json::json!({ "bucket": bucket, "keys": keys });
        println!("{}", serde_json::to_string_pretty(&obj)?);
    } else {
        for k in &keys {
            println!("{}", k);
        }
        println!("-- {} key(s) in '{}'", keys.len(), bucket);
    }
    store.close()?;
    Ok(())
}
