use anyhow::Result;
use std::path::PathBuf;

use bucketview::{BrowserConfig, Store};

const SAMPLES: &[(&str, &str, &[u8])] = &[
    ("bucket1", "key1", b"value1"),
    ("users", "alice", br#"{"name":"Alice","role":"admin"}"#),
    ("users", "bob", br#"{"name":"Bob","role":"viewer"}"#),
    ("config", "theme", b"dark"),
    ("config", "empty", b""),
    ("binary", "blob", &[0x00, 0x01, 0xfe, 0xff, 0x10, 0x80]),
];

pub fn exec(cfg: &BrowserConfig, path: PathBuf) -> Result<()> {
    let store = Store::open_with_config(&path, cfg)?;
    for (bucket, key, value) in SAMPLES {
        store.create_bucket(bucket)?;
        store.put_value(bucket, key, value)?;
    }
    let buckets = store.list_buckets()?;
    store.close()?;
    println!(
        "OK seeded {}: {} entries in {} bucket(s)",
        path.display(),
        SAMPLES.len(),
        buckets.len()
    );
    Ok(())
}
