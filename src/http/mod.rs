//! http: JSON API over the registry.
//!
//! - route:  URL -> `Route`
//! - api:    `Route` + method -> one registry/store call -> status + JSON
//! - server: tiny_http listener and workers

pub mod api;
pub mod route;
pub mod server;

pub use api::{status_for, Api, ApiResponse};
pub use route::{resolve, Route, Target};
pub use server::{HttpServer, ShutdownHandle};
