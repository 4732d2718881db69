use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use bucketview::http::{Api, HttpServer};
use bucketview::{BrowserConfig, Registry};

pub fn exec(
    mut cfg: BrowserConfig,
    path: PathBuf,
    addr: Option<String>,
    workers: Option<usize>,
    name: Option<String>,
) -> Result<()> {
    if let Some(a) = addr {
        cfg = cfg.with_http_addr(a);
    }
    if let Some(n) = workers {
        cfg = cfg.with_http_workers(n);
    }
    if let Some(n) = name {
        cfg = cfg.with_default_db_name(n);
    }
    log::info!("serve: {}", cfg);

    let default_name = cfg.default_db_name.clone();
    let addr = cfg.http_addr.clone();
    let registry = Registry::with_default(&default_name, &path, cfg)
        .with_context(|| format!("open {}", path.display()))?;
    let registry = Arc::new(registry);
    log::info!("serve: '{}' -> {}", default_name, path.display());

    let server = HttpServer::bind(&addr, Api::new(registry.clone()))?;
    let res = server.run();

    registry.close_all()?;
    res
}
