use droplinkapp::error::DroplinkError;
use droplinkapp::store::fs_backend::FsBackend;
use droplinkapp::store::link_store::LinkStore;
use droplinkapp::store::settings_store::SettingsStore;
use droplinkapp::store::{BlobStore, Entries, LINKS_KEY};
use serde_json::json;
use std::cell::RefCell;
use std::fs;
use std::rc::Rc;
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().join("data"));
    (dir, backend)
}

#[test]
fn test_fs_backend_missing_key_is_absent() {
    let (_dir, backend) = setup();
    let got = backend.get(&["links", "settings"]).unwrap();
    assert!(got.is_empty());
}

#[test]
fn test_fs_backend_creates_root_and_writes_key_file() {
    let (_dir, backend) = setup();
    let mut entries = Entries::new();
    entries.insert("links".into(), json!([]));
    backend.set(entries).unwrap();

    let path = backend.key_path("links");
    assert!(path.exists());
    assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
}

#[test]
fn test_fs_backend_atomic_write_artifacts() {
    let (_dir, backend) = setup();
    let mut store = LinkStore::new(&backend);
    store.add("a.com", "A", vec![]).unwrap();
    store.add("b.com", "B", vec![]).unwrap();

    for entry in fs::read_dir(backend.root()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_link_store_persists_across_instances() {
    let (dir, backend) = setup();
    let mut store = LinkStore::new(backend);
    let added = store.add("example.com/x", "X", vec!["Airdrop".into()]).unwrap();

    let reopened = LinkStore::new(FsBackend::new(dir.path().join("data")));
    let links = reopened.list().unwrap();
    assert_eq!(links, vec![added]);
}

#[test]
fn test_links_file_is_extension_compatible_json() {
    let (_dir, backend) = setup();
    let mut store = LinkStore::new(&backend);
    store.add("a.com", "A", vec!["x".into()]).unwrap();

    let raw = fs::read_to_string(backend.key_path(LINKS_KEY)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let first = &value[0];
    assert_eq!(first["url"], json!("https://a.com"));
    assert!(first["createdAt"].is_string());
    assert_eq!(first["tags"], json!(["x"]));
}

#[test]
fn test_corrupt_links_file_is_reported() {
    let (_dir, backend) = setup();
    fs::create_dir_all(backend.root()).unwrap();
    fs::write(backend.key_path(LINKS_KEY), "{not json").unwrap();

    let store = LinkStore::new(&backend);
    assert!(matches!(
        store.list(),
        Err(DroplinkError::Serialization(_))
    ));
}

#[test]
fn test_listeners_see_changes_on_disk_backend() {
    let (_dir, backend) = setup();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    assert!(backend.subscribe(Box::new(move |changes| {
        sink.borrow_mut()
            .extend(changes.iter().map(|c| (c.key.clone(), c.old_value.is_some())));
    })));

    let settings = SettingsStore::new(&backend);
    settings.ensure_initialized().unwrap();
    settings.save(&settings.load().unwrap()).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![("settings".to_string(), false), ("settings".to_string(), true)]
    );
}

#[test]
fn test_listener_can_subscribe_during_notification() {
    let (_dir, backend) = setup();
    let backend = Rc::new(backend);
    let late = Rc::new(RefCell::new(Vec::new()));
    let weak = Rc::downgrade(&backend);
    let sink = Rc::clone(&late);
    assert!(backend.subscribe(Box::new(move |_| {
        if let Some(backend) = weak.upgrade() {
            let sink = Rc::clone(&sink);
            backend.subscribe(Box::new(move |changes| {
                sink.borrow_mut()
                    .extend(changes.iter().map(|c| c.key.clone()));
            }));
        }
    })));

    let mut entries = Entries::new();
    entries.insert(LINKS_KEY.into(), json!([]));
    backend.set(entries.clone()).unwrap();
    assert!(late.borrow().is_empty());

    backend.set(entries).unwrap();
    assert_eq!(*late.borrow(), vec![LINKS_KEY.to_string()]);
}
