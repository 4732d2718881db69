use anyhow::{anyhow, Result};
use std::path::PathBuf;

use bucketview::BrowserConfig;

use super::util::{decode_value_arg, open_existing, read_all};

pub fn exec(
    cfg: &BrowserConfig,
    path: PathBuf,
    bucket: String,
    key: String,
    value: Option<String>,
    value_file: Option<PathBuf>,
) -> Result<()> {
    let val_bytes = match (value, value_file) {
        (_, Some(p)) => read_all(&p)?,
        (Some(s), None) => decode_value_arg(&s)?,
        (None, None) => return Err(anyhow!("either --value or --value-file must be provided")),
    };

    let store = open_existing(cfg, &path)?;
    store.put_value(&bucket, &key, &val_bytes)?;
    store.close()?;
    println!("OK put: '{}'/'{}' = {} B", bucket, key, val_bytes.len());
    Ok(())
}
