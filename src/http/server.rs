//! http/server: tiny_http listener and worker threads.
//!
//! Each worker polls the shared listener, reads the (size-capped) body, hands
//! the request to `Api::handle` and writes the JSON reply. `ShutdownHandle`
//! flips a flag the workers check between polls.

use std::io::Read;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use tiny_http::{Header, Request, Response, Server};

use super::api::{Api, ApiResponse};

const POLL: Duration = Duration::from_millis(200);

pub struct HttpServer {
    server: Arc<Server>,
    api: Arc<Api>,
    workers: usize,
    max_body_bytes: usize,
    stop: Arc<AtomicBool>,
}

#[derive(Clone)]
pub struct ShutdownHandle {
    stop: Arc<AtomicBool>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }
}

impl HttpServer {
    /// Bind `addr`; worker count and body cap come from the registry's config.
    pub fn bind(addr: &str, api: Api) -> Result<Self> {
        let cfg = api.registry().config();
        let workers = cfg.http_workers.max(1);
        let max_body_bytes = cfg.max_body_bytes;

        let server = Server::http(addr).map_err(|e| anyhow!("bind http at {}: {}", addr, e))?;
        Ok(Self {
            server: Arc::new(server),
            api: Arc::new(api),
            workers,
            max_body_bytes,
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            stop: Arc::clone(&self.stop),
        }
    }

    /// Serve until a `ShutdownHandle` fires.
    pub fn run(&self) -> Result<()> {
        match self.local_addr() {
            Some(a) => info!("bucketview http listening on {} ({} workers)", a, self.workers),
            None => info!("bucketview http listening ({} workers)", self.workers),
        }

        thread::scope(|s| {
            for _ in 0..self.workers {
                s.spawn(|| self.worker_loop());
            }
        });

        info!("bucketview http stopped");
        Ok(())
    }

    fn worker_loop(&self) {
        while !self.stop.load(Ordering::SeqCst) {
            let rq = match self.server.recv_timeout(POLL) {
                Ok(Some(rq)) => rq,
                Ok(None) => continue,
                Err(e) => {
                    warn!("http recv error: {}", e);
                    continue;
                }
            };
            self.serve_one(rq);
        }
    }

    fn serve_one(&self, mut rq: Request) {
        let method = rq.method().clone();
        let url = rq.url().to_string();

        let resp = match read_body(&mut rq, self.max_body_bytes) {
            Ok(body) => self.api.handle(&method, &url, &body),
            Err(resp) => resp,
        };

        debug!("{} {} -> {}", method, url, resp.status);
        if resp.status >= 500 {
            warn!("{} {} failed: {}", method, url, resp.body);
        }

        let payload = match serde_json::to_vec(&resp.body) {
            Ok(p) => p,
            Err(e) => {
                warn!("encode response for {}: {}", url, e);
                b"{\"error\":\"internal error\"}".to_vec()
            }
        };
        let mut out = Response::from_data(payload).with_status_code(resp.status);
        if let Ok(ct) = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
            out.add_header(ct);
        }
        if let Err(e) = rq.respond(out) {
            warn!("http respond error: {}", e);
        }
    }
}

fn read_body(rq: &mut Request, max: usize) -> std::result::Result<Vec<u8>, ApiResponse> {
    if rq.body_length().map_or(false, |n| n > max) {
        return Err(ApiResponse::error(413, "request body too large"));
    }
    let mut body = Vec::new();
    rq.as_reader()
        .take(max as u64 + 1)
        .read_to_end(&mut body)
        .map_err(|e| ApiResponse::error(400, format!("read body: {}", e)))?;
    if body.len() > max {
        return Err(ApiResponse::error(413, "request body too large"));
    }
    Ok(body)
}
