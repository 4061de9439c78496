// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[test]
fn create_then_list_pending_round_trips() {
    let mut store = ApprovalStore::default();
    store.create("a1", "run rm -rf /tmp/x", 1_000);

    let pending = store.pending();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, "a1");
    assert!(pending[0].is_pending());
}

#[test]
fn resolve_marks_approved_and_removes_from_pending() {
    let mut store = ApprovalStore::default();
    store.create("a1", "send email", 1_000);

    let resolved = store.resolve("a1", true, 2_000).unwrap();
    assert_eq!(resolved.approved, Some(true));
    assert_eq!(resolved.decided_at_ms, Some(2_000));
    assert!(store.pending().is_empty());
    assert_eq!(store.all().len(), 1);
}

#[test]
fn resolve_unknown_id_returns_none() {
    let mut store = ApprovalStore::default();
    assert!(store.resolve("nope", false, 1_000).is_none());
}

#[test]
fn save_then_load_round_trips_through_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("approvals.json");

    let mut store = ApprovalStore::default();
    store.create("a1", "reason", 1_000);
    store.save(&path).unwrap();

    let loaded = ApprovalStore::load(&path);
    assert_eq!(loaded.pending().len(), 1);
}

#[test]
fn load_missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let loaded = ApprovalStore::load(&dir.path().join("nope.json"));
    assert!(loaded.all().is_empty());
}
