// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use aviary_core::SessionId;
use tempfile::tempdir;

#[test]
fn load_missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let index = SessionIndex::load(&dir.path().join("index.json"));
    assert!(index.sessions.is_empty());
}

#[test]
fn load_corrupt_file_starts_fresh_and_does_not_panic() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("index.json");
    std::fs::write(&path, b"{not json").unwrap();
    let index = SessionIndex::load(&path);
    assert!(index.sessions.is_empty());
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("index.json");
    let mut index = SessionIndex::default();
    index.upsert(SessionMeta::new_lazy(SessionId::new("s1"), 1000));
    index.save(&path).unwrap();

    let loaded = SessionIndex::load(&path);
    assert_eq!(loaded.get("s1").unwrap().title, "New Session");
}

#[test]
fn upsert_replaces_existing_entry() {
    let mut index = SessionIndex::default();
    index.upsert(SessionMeta::new_lazy(SessionId::new("s1"), 1000));
    let mut updated = SessionMeta::new_lazy(SessionId::new("s1"), 1000);
    updated.title = "Renamed".to_string();
    index.upsert(updated);
    assert_eq!(index.get("s1").unwrap().title, "Renamed");
    assert_eq!(index.sessions.len(), 1);
}

#[test]
fn remove_deletes_entry_and_missing_is_noop() {
    let mut index = SessionIndex::default();
    index.upsert(SessionMeta::new_lazy(SessionId::new("s1"), 1000));
    assert!(index.remove("s1").is_some());
    assert!(index.remove("s1").is_none());
    assert!(index.get("s1").is_none());
}

#[test]
fn list_returns_all_sessions() {
    let mut index = SessionIndex::default();
    index.upsert(SessionMeta::new_lazy(SessionId::new("s1"), 1000));
    index.upsert(SessionMeta::new_lazy(SessionId::new("s2"), 1000));
    assert_eq!(index.list().len(), 2);
}
