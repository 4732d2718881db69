use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::io::Read;
use std::path::{Path, PathBuf};

use bucketview::{BrowserConfig, Store};

/// Open an existing database for a one-shot command; never creates the file.
pub fn open_existing(cfg: &BrowserConfig, path: &Path) -> Result<Store> {
    let cfg = cfg.clone().with_create_if_missing(false);
    Store::open_with_config(path, &cfg).with_context(|| format!("open {}", path.display()))
}

pub fn decode_value_arg(arg: &str) -> Result<Vec<u8>> {
    if arg == "-" {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        return Ok(buf);
    }
    if let Some(p) = arg.strip_prefix('@') {
        return read_all(Path::new(p));
    }
    if let Some(hx) = arg.strip_prefix("hex:") {
        return decode_hex(hx);
    }
    Ok(arg.as_bytes().to_vec())
}

pub fn decode_hex(s: &str) -> Result<Vec<u8>> {
    let s = s.trim();
    if s.len() % 2 != 0 {
        return Err(anyhow!("hex string must have even length"));
    }
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len() / 2);
    for (i, pair) in bytes.chunks(2).enumerate() {
        let h = (pair[0] as char)
            .to_digit(16)
            .ok_or_else(|| anyhow!("invalid hex at pos {}", 2 * i))?;
        let l = (pair[1] as char)
            .to_digit(16)
            .ok_or_else(|| anyhow!("invalid hex at pos {}", 2 * i + 1))?;
        out.push(((h << 4) | l) as u8);
    }
    Ok(out)
}

pub fn read_all(p: &Path) -> Result<Vec<u8>> {
    let mut f = OpenOptions::new()
        .read(true)
        .open(p)
        .with_context(|| format!("open value file {}", p.display()))?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    Ok(buf)
}

/// Database files directly inside `dir`, sorted.
pub fn db_candidates(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let p = entry?.path();
        let is_db = p
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("db") || e.eq_ignore_ascii_case("redb"))
            .unwrap_or(false);
        if is_db && p.is_file() {
            out.push(p);
        }
    }
    out.sort();
    Ok(out)
}
