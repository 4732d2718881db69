use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bucketview::tui::{self, App};
use bucketview::{BrowserConfig, DisplayMode, Store};

use super::util::db_candidates;

pub fn exec(
    cfg: BrowserConfig,
    file: Option<PathBuf>,
    dir: PathBuf,
    mode: Option<DisplayMode>,
) -> Result<()> {
    let path = match file {
        Some(p) => p,
        None => pick_from_dir(&dir)?,
    };

    // the browser opens existing files only
    let cfg = cfg.with_create_if_missing(false);
    let store = Store::open_with_config(&path, &cfg)
        .with_context(|| format!("open {}", path.display()))?;
    let store = Arc::new(store);

    let mut app = App::new(store.clone(), mode.unwrap_or(cfg.display_mode))?;
    let res = tui::run(&mut app);
    store.close()?;
    res
}

fn pick_from_dir(dir: &Path) -> Result<PathBuf> {
    let mut found = db_candidates(dir)?;
    match found.len() {
        0 => Err(anyhow!(
            "no .db/.redb files in {}; pass --file",
            dir.display()
        )),
        1 => Ok(found.remove(0)),
        _ => {
            println!("Several database files in {}:", dir.display());
            for p in &found {
                println!("  {}", p.display());
            }
            Err(anyhow!("choose one with --file"))
        }
    }
}
