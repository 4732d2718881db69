//! http/api: request dispatch, one route to one registry or store operation.
//!
//! `Api::handle` is transport-free (method, url, body in; status and JSON
//! out) so the routing table can be exercised without a socket.

use std::io;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tiny_http::Method;

use crate::display::{format_value, DisplayMode};
use crate::error::Error;
use crate::registry::Registry;
use crate::store::Store;

use super::route::{resolve, Route, Target};

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    fn ok(body: Value) -> Self {
        Self::new(200, body)
    }

    fn message(status: u16, msg: &str) -> Self {
        Self::new(status, json!({ "message": msg }))
    }

    pub fn error(status: u16, msg: impl Into<String>) -> Self {
        Self::new(status, json!({ "error": msg.into() }))
    }

    fn from_error(e: &Error) -> Self {
        Self::error(status_for(e), e.to_string())
    }
}

/// HTTP status for a core error.
pub fn status_for(e: &Error) -> u16 {
    match e {
        Error::BucketNotFound(_) | Error::KeyNotFound { .. } | Error::NotFound(_) => 404,
        Error::NameCollision(_) | Error::AlreadyOpen(_) => 409,
        Error::InvalidName(_) => 400,
        Error::NotOpen | Error::LockTimeout { .. } => 503,
        Error::Io(io) if io.kind() == io::ErrorKind::NotFound => 404,
        Error::Io(_) | Error::Engine(_) => 500,
    }
}

// -------------------- request bodies --------------------

#[derive(Debug, Deserialize)]
struct OpenDatabaseBody {
    name: Option<String>,
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreateBucketBody {
    bucket_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RenameBucketBody {
    new_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PutValueBody {
    key: Option<String>,
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RenameKeyBody {
    new_key: Option<String>,
}

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiResponse> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiResponse::error(400, "request body is required"));
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiResponse::error(400, format!("invalid JSON body: {}", e)))
}

/// A non-empty string field.
fn required(v: Option<String>, field: &str) -> Result<String, ApiResponse> {
    match v {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(ApiResponse::error(400, format!("{} is required", field))),
    }
}

/// Present, possibly empty.
fn present(v: Option<String>, field: &str) -> Result<String, ApiResponse> {
    v.ok_or_else(|| ApiResponse::error(400, format!("{} is required", field)))
}

// -------------------- dispatch --------------------

pub struct Api {
    registry: Arc<Registry>,
}

impl Api {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn handle(&self, method: &Method, url: &str, body: &[u8]) -> ApiResponse {
        let target = match resolve(url, &self.registry.config().default_db_name) {
            Some(t) => t,
            None => return ApiResponse::error(404, "not found"),
        };
        match self.dispatch(method, &target, body) {
            Ok(resp) | Err(resp) => resp,
        }
    }

    fn dispatch(&self, method: &Method, t: &Target, body: &[u8]) -> Result<ApiResponse, ApiResponse> {
        match (&t.route, method) {
            (Route::Health, Method::Get) => Ok(ApiResponse::ok(json!({ "status": "ok" }))),

            (Route::Databases, Method::Get) => {
                Ok(ApiResponse::ok(json!({ "databases": self.registry.list() })))
            }
            (Route::Databases, Method::Post) => {
                let req: OpenDatabaseBody = parse_body(body)?;
                let name = required(req.name, "name")?;
                let path = required(req.path, "path")?;
                self.registry.open(&name, &path).map_err(err)?;
                Ok(ApiResponse::new(
                    201,
                    json!({ "message": "database opened successfully", "name": name }),
                ))
            }
            (Route::Database(db), Method::Delete) => {
                self.registry.close(db).map_err(err)?;
                Ok(ApiResponse::message(200, "database closed successfully"))
            }

            (Route::Buckets(db), Method::Get) => {
                let buckets = self.store(db)?.list_buckets().map_err(err)?;
                Ok(ApiResponse::ok(json!({ "buckets": buckets })))
            }
            (Route::Buckets(db), Method::Post) => {
                let req: CreateBucketBody = parse_body(body)?;
                let name = required(req.bucket_name, "bucket_name")?;
                self.store(db)?.create_bucket(&name).map_err(err)?;
                Ok(ApiResponse::message(201, "bucket created successfully"))
            }
            (Route::Bucket(db, bucket), Method::Delete) => {
                self.store(db)?.delete_bucket(bucket).map_err(err)?;
                Ok(ApiResponse::message(200, "bucket deleted successfully"))
            }
            (Route::Bucket(db, bucket), Method::Put) => {
                let req: RenameBucketBody = parse_body(body)?;
                let new_name = required(req.new_name, "new_name")?;
                self.store(db)?.rename_bucket(bucket, &new_name).map_err(err)?;
                Ok(ApiResponse::message(200, "bucket renamed successfully"))
            }

            (Route::Keys(db, bucket), Method::Get) => {
                let keys = self.store(db)?.list_keys(bucket).map_err(err)?;
                Ok(ApiResponse::ok(json!({ "keys": keys })))
            }
            (Route::Keys(db, bucket), Method::Post) => {
                let req: PutValueBody = parse_body(body)?;
                let key = required(req.key, "key")?;
                let value = present(req.value, "value")?;
                self.store(db)?
                    .put_value(bucket, &key, value.as_bytes())
                    .map_err(err)?;
                Ok(ApiResponse::message(200, "value stored successfully"))
            }
            (Route::Key(db, bucket, key), Method::Get) => {
                let mode = match t.query_param("encoding") {
                    Some(s) => s
                        .parse::<DisplayMode>()
                        .map_err(|e| ApiResponse::error(400, e))?,
                    None => DisplayMode::Raw,
                };
                // an absent key reads as null, not an error; "" stays an empty value
                let value = self.store(db)?.get_value(bucket, key).map_err(err)?;
                Ok(ApiResponse::ok(json!({
                    "key": key,
                    "value": value.map(|v| format_value(&v, mode)),
                    "encoding": mode.as_str(),
                })))
            }
            (Route::Key(db, bucket, key), Method::Delete) => {
                self.store(db)?.delete_value(bucket, key).map_err(err)?;
                Ok(ApiResponse::message(200, "key deleted successfully"))
            }
            (Route::Key(db, bucket, key), Method::Put) => {
                let req: RenameKeyBody = parse_body(body)?;
                let new_key = required(req.new_key, "new_key")?;
                self.store(db)?
                    .rename_key(bucket, key, &new_key)
                    .map_err(err)?;
                Ok(ApiResponse::message(200, "key renamed successfully"))
            }

            _ => Err(ApiResponse::error(405, "method not allowed")),
        }
    }

    fn store(&self, db: &str) -> Result<Arc<Store>, ApiResponse> {
        self.registry.get(db).map_err(err)
    }
}

fn err(e: Error) -> ApiResponse {
    ApiResponse::from_error(&e)
}
