use anyhow::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use oorandom::Rand64;

use bucketview::{BrowserConfig, Error, Store};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn unique_root(prefix: &str) -> PathBuf {
    let pid = std::process::id();
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("bvtest-store-{prefix}-{pid}-{t}-{id}"))
}

fn cfg() -> BrowserConfig {
    BrowserConfig::default().with_open_timeout_ms(200)
}

#[test]
fn buckets_create_list_delete() -> Result<()> {
    let root = unique_root("buckets");
    let store = Store::open_with_config(root.join("t.redb"), &cfg())?;
    assert!(store.list_buckets()?.is_empty());

    store.create_bucket("b")?;
    store.create_bucket("a")?;
    // second create is a no-op
    store.create_bucket("b")?;
    assert_eq!(store.list_buckets()?, vec!["a".to_string(), "b".to_string()]);
    assert!(store.bucket_exists("a")?);
    assert!(!store.bucket_exists("zzz")?);

    store.put_value("b", "k", b"v")?;
    store.delete_bucket("b")?;
    assert_eq!(store.list_buckets()?, vec!["a".to_string()]);
    assert!(matches!(store.list_keys("b"), Err(Error::BucketNotFound(_))));
    assert!(matches!(store.delete_bucket("b"), Err(Error::BucketNotFound(_))));
    assert!(matches!(store.create_bucket(""), Err(Error::InvalidName(_))));

    store.close()?;
    let _ = fs::remove_dir_all(&root);
    Ok(())
}

#[test]
fn put_get_delete_and_ordering() -> Result<()> {
    let root = unique_root("kv");
    let store = Store::open_with_config(root.join("t.redb"), &cfg())?;
    store.create_bucket("users")?;

    store.put_value("users", "carol", b"3")?;
    store.put_value("users", "alice", b"1")?;
    store.put_value("users", "bob", b"2")?;
    assert_eq!(store.list_keys("users")?, vec!["alice", "bob", "carol"]);

    // overwrite keeps one entry
    store.put_value("users", "bob", b"22")?;
    assert_eq!(store.get_value("users", "bob")?, Some(b"22".to_vec()));
    assert_eq!(store.list_keys("users")?.len(), 3);

    let entries = store.list_entries("users")?;
    assert_eq!(entries[0], ("alice".to_string(), b"1".to_vec()));
    assert_eq!(entries[2], ("carol".to_string(), b"3".to_vec()));

    store.delete_value("users", "alice")?;
    assert_eq!(store.get_value("users", "alice")?, None);
    // deleting again is fine
    store.delete_value("users", "alice")?;

    // writes never create buckets implicitly
    assert!(matches!(
        store.put_value("nope", "k", b"v"),
        Err(Error::BucketNotFound(_))
    ));
    assert!(matches!(
        store.get_value("nope", "k"),
        Err(Error::BucketNotFound(_))
    ));
    assert!(matches!(
        store.put_value("users", "", b"v"),
        Err(Error::InvalidName(_))
    ));

    store.close()?;
    let _ = fs::remove_dir_all(&root);
    Ok(())
}

#[test]
fn empty_value_is_not_absent() -> Result<()> {
    let root = unique_root("empty");
    let store = Store::open_with_config(root.join("t.redb"), &cfg())?;
    store.create_bucket("b")?;

    store.put_value("b", "empty", b"")?;
    assert_eq!(store.get_value("b", "empty")?, Some(Vec::new()));
    assert_eq!(store.get_value("b", "missing")?, None);
    assert_eq!(store.list_keys("b")?, vec!["empty"]);

    store.close()?;
    let _ = fs::remove_dir_all(&root);
    Ok(())
}

#[test]
fn data_survives_reopen_randomized() -> Result<()> {
    let root = unique_root("reopen");
    let path = root.join("t.redb");
    let mut rng = Rand64::new(0xB0C7E7);
    let mut model: BTreeMap<String, Vec<u8>> = BTreeMap::new();

    {
        let store = Store::open_with_config(&path, &cfg())?;
        store.create_bucket("data")?;
        for _ in 0..300 {
            let k = format!("k{:03}", rng.rand_u64() % 80);
            if rng.rand_u64() % 4 == 0 {
                store.delete_value("data", &k)?;
                model.remove(&k);
            } else {
                let len = (rng.rand_u64() % 64) as usize;
                let v: Vec<u8> = (0..len).map(|_| rng.rand_u64() as u8).collect();
                store.put_value("data", &k, &v)?;
                model.insert(k, v);
            }
        }
        store.close()?;
    }

    let store = Store::open_with_config(&path, &cfg())?;
    let got: BTreeMap<String, Vec<u8>> = store.list_entries("data")?.into_iter().collect();
    assert_eq!(got, model);
    store.close()?;
    let _ = fs::remove_dir_all(&root);
    Ok(())
}

#[test]
fn second_open_times_out_on_lock() -> Result<()> {
    let root = unique_root("lock");
    let path = root.join("t.redb");
    let first = Store::open_with_config(&path, &cfg())?;

    let t0 = Instant::now();
    let second = Store::open_with_config(&path, &cfg());
    assert!(matches!(second, Err(Error::LockTimeout { .. })));
    assert!(t0.elapsed().as_millis() >= 150, "open must wait for the lock");

    // released on close
    first.close()?;
    let again = Store::open_with_config(&path, &cfg())?;
    again.close()?;
    let _ = fs::remove_dir_all(&root);
    Ok(())
}

#[test]
fn closed_store_rejects_operations() -> Result<()> {
    let root = unique_root("closed");
    let store = Store::open_with_config(root.join("t.redb"), &cfg())?;
    store.create_bucket("b")?;
    assert!(store.is_open());

    store.close()?;
    assert!(!store.is_open());
    assert!(matches!(store.list_buckets(), Err(Error::NotOpen)));
    assert!(matches!(store.put_value("b", "k", b"v"), Err(Error::NotOpen)));
    assert!(matches!(store.rename_bucket("b", "c"), Err(Error::NotOpen)));
    assert!(matches!(store.close(), Err(Error::NotOpen)));

    let _ = fs::remove_dir_all(&root);
    Ok(())
}

#[test]
fn missing_file_without_create() -> Result<()> {
    let root = unique_root("missing");
    let path = root.join("absent.redb");
    let res = Store::open_with_config(&path, &cfg().with_create_if_missing(false));
    match res {
        Err(Error::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected NotFound io error, got {:?}", other.map(|_| ())),
    }
    assert!(!path.exists());
    Ok(())
}
