use std::fs;

use simoly_core::storage::{FormFilter, FormStore, SqliteFormStore};
use simoly_core::{Edit, FieldKind, FormDocument, FormError, FormSession};
use tempfile::TempDir;

fn store_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("forms.db")
}

fn saved_form(store: &mut SqliteFormStore, title: &str) -> FormDocument {
    let mut session = FormSession::create(title);
    session
        .apply(Edit::AddField {
            page: 0,
            kind: FieldKind::Radio,
            label: "Pick one".to_string(),
        })
        .expect("add field");
    session.save(store).expect("save should succeed");
    session.into_document()
}

#[test]
fn test_create_then_open_round_trip() {
    let dir = TempDir::new().expect("temp dir");
    let path = store_path(&dir);

    let store = SqliteFormStore::create(&path).expect("create should succeed");
    assert!(path.exists());
    let metadata = store.metadata().expect("metadata");
    assert_eq!(metadata.format_version, "1");
    assert_eq!(metadata.form_count, 0);
    drop(store);

    let store = SqliteFormStore::open(&path).expect("open should succeed");
    store.check_integrity().expect("fresh store is consistent");
}

#[test]
fn test_create_refuses_existing_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = store_path(&dir);
    fs::write(&path, b"").expect("write");

    assert!(SqliteFormStore::create(&path).is_err());
}

#[test]
fn test_open_missing_file_fails() {
    let dir = TempDir::new().expect("temp dir");
    let result = SqliteFormStore::open(&store_path(&dir));
    assert!(matches!(result, Err(FormError::StoreNotFound)));
}

#[test]
fn test_save_and_load_document() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = SqliteFormStore::create(&store_path(&dir)).expect("create");

    let form = saved_form(&mut store, "Intake");
    let loaded = store
        .get_form(&form.id)
        .expect("get should succeed")
        .expect("form should exist");

    assert_eq!(loaded, form);
    assert_eq!(loaded.pages[0].fields[0].options.len(), 2);
    assert_eq!(store.metadata().expect("metadata").form_count, 1);
}

#[test]
fn test_upsert_replaces_whole_document() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = SqliteFormStore::create(&store_path(&dir)).expect("create");
    let form = saved_form(&mut store, "Intake");

    let mut session = FormSession::new(form.clone());
    session
        .apply(Edit::SetTitle("Renamed".to_string()))
        .expect("rename");
    session.apply(Edit::AddPage { title: None }).expect("page");
    session.save(&mut store).expect("save");
    assert!(!session.is_dirty());

    let loaded = store.get_form(&form.id).expect("get").expect("exists");
    assert_eq!(loaded.title, "Renamed");
    assert_eq!(loaded.pages.len(), 2);
    assert_eq!(loaded.created_at, form.created_at);

    let listed = store.list_forms(&FormFilter::new()).expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Renamed");
    assert_eq!(listed[0].page_count, 2);
}

#[test]
fn test_list_filters_and_ordering() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = SqliteFormStore::create(&store_path(&dir)).expect("create");

    let first = saved_form(&mut store, "Customer intake");
    let second = saved_form(&mut store, "Exit survey");

    let mut session = FormSession::new(first.clone());
    session.apply(Edit::SetActive(false)).expect("deactivate");
    session.save(&mut store).expect("save");

    let all = store.list_forms(&FormFilter::new()).expect("list");
    let ids: Vec<_> = all.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);

    let active = store
        .list_forms(&FormFilter::new().active(true))
        .expect("list active");
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, second.id);

    let titled = store
        .list_forms(&FormFilter::new().title("INTAKE"))
        .expect("list by title");
    assert_eq!(titled.len(), 1);
    assert_eq!(titled[0].id, first.id);

    let limited = store
        .list_forms(&FormFilter::new().limit(1))
        .expect("list limited");
    assert_eq!(limited.len(), 1);
}

#[test]
fn test_find_by_prefix() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = SqliteFormStore::create(&store_path(&dir)).expect("create");
    let form = saved_form(&mut store, "Intake");

    let prefix = &form.id.to_string()[..8];
    let found = store
        .find_form_by_prefix(prefix)
        .expect("lookup")
        .expect("form should match");
    assert_eq!(found.id, form.id);

    let other = if prefix.starts_with('0') { "1" } else { "0" };
    assert!(store.find_form_by_prefix(other).expect("lookup").is_none());
    assert!(store.find_form_by_prefix("not-hex!").is_err());
}

#[test]
fn test_delete_form() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = SqliteFormStore::create(&store_path(&dir)).expect("create");
    let form = saved_form(&mut store, "Intake");

    store.delete_form(&form.id).expect("delete");
    assert!(store.get_form(&form.id).expect("get").is_none());

    let err = store.delete_form(&form.id).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_data_survives_reopen() {
    let dir = TempDir::new().expect("temp dir");
    let path = store_path(&dir);
    let form = {
        let mut store = SqliteFormStore::create(&path).expect("create");
        saved_form(&mut store, "Persistent")
    };

    let store = SqliteFormStore::open(&path).expect("open");
    let loaded = store.get_form(&form.id).expect("get").expect("exists");
    assert_eq!(loaded.title, "Persistent");
    store.check_integrity().expect("integrity");
}

#[test]
fn test_pageless_document_is_rejected_on_load() {
    let dir = TempDir::new().expect("temp dir");
    let mut store = SqliteFormStore::create(&store_path(&dir)).expect("create");
    let mut form = saved_form(&mut store, "Hollow");
    form.pages.clear();
    store.upsert_form(&form).expect("upsert stores the raw document");

    let err = store.get_form(&form.id).unwrap_err();
    assert!(matches!(err, FormError::Storage(ref message) if message.contains("no pages")));
    assert!(store.check_integrity().is_err());
}
