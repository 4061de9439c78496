// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[test]
fn unexpired_lease_is_detected() {
    let mut task = Task::new("t1", "@every 1m", "default", 1_000);
    task.lease = Some(Lease {
        run_id: "r1".into(),
        expires_at_ms: 2_000,
    });
    assert!(task.has_unexpired_lease(1_500));
    assert!(!task.has_unexpired_lease(2_500));
}

#[test]
fn no_lease_is_never_unexpired() {
    let task = Task::new("t1", "@every 1m", "default", 1_000);
    assert!(!task.has_unexpired_lease(500));
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    let mut store = TaskStore::default();
    store.upsert(Task::new("t1", "@every 1m", "default", 1_000));
    store.save(&path).unwrap();

    let loaded = TaskStore::load(&path);
    assert_eq!(loaded.get("t1").unwrap().schedule, "@every 1m");
}

#[test]
fn load_missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let store = TaskStore::load(&dir.path().join("missing.json"));
    assert!(store.tasks.is_empty());
}
