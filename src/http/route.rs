//! http/route: URL -> route resolution.
//!
//! Accepted shapes (each optionally prefixed with `/api/v1`):
//!   /health
//!   /databases[/{name}[/buckets[/{bucket}[/keys[/{key}]]]]]
//! plus the single-database group `/api/v1/db/buckets/...`, which addresses
//! the registry's default database.
//!
//! Path segments are percent-decoded after splitting, so `%2F` inside a key
//! stays part of the key.

use percent_encoding::percent_decode_str;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Health,
    Databases,
    Database(String),
    Buckets(String),
    Bucket(String, String),
    Keys(String, String),
    Key(String, String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub route: Route,
    pub query: Vec<(String, String)>,
}

impl Target {
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

const API_PREFIX: &str = "/api/v1";

/// Resolve `url` (path plus optional query). `None` means no such route.
pub fn resolve(url: &str, default_db: &str) -> Option<Target> {
    let (path, query) = match url.split_once('?') {
        Some((p, q)) => (p, q),
        None => (url, ""),
    };

    let mut rest = path;
    let mut prefixed = false;
    if let Some(r) = path.strip_prefix(API_PREFIX) {
        if r.is_empty() || r.starts_with('/') {
            rest = r;
            prefixed = true;
        }
    }

    let mut segs = Vec::new();
    for raw in rest.split('/').filter(|s| !s.is_empty()) {
        segs.push(percent_decode(raw, false)?);
    }

    if prefixed && segs.first().map(String::as_str) == Some("db") {
        segs[0] = default_db.to_string();
        segs.insert(0, "databases".to_string());
    }

    let seg: Vec<&str> = segs.iter().map(String::as_str).collect();
    let route = match seg.as_slice() {
        ["health"] => Route::Health,
        ["databases"] => Route::Databases,
        ["databases", db] => Route::Database(db.to_string()),
        ["databases", db, "buckets"] => Route::Buckets(db.to_string()),
        ["databases", db, "buckets", b] => Route::Bucket(db.to_string(), b.to_string()),
        ["databases", db, "buckets", b, "keys"] => Route::Keys(db.to_string(), b.to_string()),
        ["databases", db, "buckets", b, "keys", k] => {
            Route::Key(db.to_string(), b.to_string(), k.to_string())
        }
        _ => return None,
    };

    Some(Target {
        route,
        query: parse_query(query),
    })
}

fn parse_query(q: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for pair in q.split('&').filter(|s| !s.is_empty()) {
        let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
        if let (Some(k), Some(v)) = (percent_decode(k, true), percent_decode(v, true)) {
            out.push((k, v));
        }
    }
    out
}

/// Decode `%XX` escapes (and `+` as space when `plus_space`). Malformed
/// escapes pass through literally; `None` when the result is not UTF-8.
pub fn percent_decode(s: &str, plus_space: bool) -> Option<String> {
    let spaced;
    let s = if plus_space {
        spaced = s.replace('+', " ");
        spaced.as_str()
    } else {
        s
    };
    percent_decode_str(s)
        .decode_utf8()
        .ok()
        .map(|c| c.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(url: &str) -> Option<Route> {
        resolve(url, "default").map(|t| t.route)
    }

    #[test]
    fn resolves_api_shapes() {
        assert_eq!(route("/health"), Some(Route::Health));
        assert_eq!(route("/databases"), Some(Route::Databases));
        assert_eq!(route("/api/v1/databases/"), Some(Route::Databases));
        assert_eq!(
            route("/api/v1/databases/main/buckets/users/keys/alice"),
            Some(Route::Key("main".into(), "users".into(), "alice".into()))
        );
        assert_eq!(
            route("/databases/main/buckets/users"),
            Some(Route::Bucket("main".into(), "users".into()))
        );
        assert_eq!(route("/databases/main/tables"), None);
        assert_eq!(route("/api/v2/databases"), None);
    }

    #[test]
    fn legacy_group_uses_default_database() {
        assert_eq!(
            route("/api/v1/db/buckets/users/keys"),
            Some(Route::Keys("default".into(), "users".into()))
        );
        // only under the prefix
        assert_eq!(route("/db/buckets"), None);
    }

    #[test]
    fn decodes_segments_and_query() {
        let t = resolve("/databases/main/buckets/my%20bucket/keys/a%2Fb?encoding=hex&x=1+2", "d")
            .unwrap();
        assert_eq!(
            t.route,
            Route::Key("main".into(), "my bucket".into(), "a/b".into())
        );
        assert_eq!(t.query_param("encoding"), Some("hex"));
        assert_eq!(t.query_param("x"), Some("1 2"));
        assert_eq!(t.query_param("missing"), None);
    }

    #[test]
    fn percent_decoding_edges() {
        assert_eq!(percent_decode("abc%2", false).as_deref(), Some("abc%2"));
        assert_eq!(percent_decode("%zz", false).as_deref(), Some("%zz"));
        assert_eq!(percent_decode("%ff", false), None); // not UTF-8
        assert_eq!(percent_decode("a+b", false).as_deref(), Some("a+b"));
        assert_eq!(percent_decode("a+b%2B", true).as_deref(), Some("a b+"));
        assert_eq!(route("/databases/a%ff"), None);
    }
}
