use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use bucketview::{format_value, BrowserConfig, DisplayMode};

use super::util::open_existing;

pub fn exec(
    cfg: &BrowserConfig,
    path: PathBuf,
    bucket: String,
    key: String,
    mode: DisplayMode,
    out: Option<PathBuf>,
) -> Result<()> {
    let store = open_existing(cfg, &path)?;
    let value = store.get_value(&bucket, &key)?;
    store.close()?;

    let Some(v) = value else {
        println!("NOT FOUND '{}' in '{}'", key, bucket);
        return Ok(());
    };

    match out {
        Some(out_path) => {
            if let Some(parent) = out_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            let mut f = OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .open(&out_path)?;
            f.write_all(&v)?;
            f.sync_all()?;
            println!("FOUND '{}': {} B -> wrote to {}", key, v.len(), out_path.display());
        }
        None => println!("{}", format_value(&v, mode)),
    }
    Ok(())
}
