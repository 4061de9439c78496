// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use tempfile::tempdir;

#[test]
fn first_submission_is_not_a_duplicate() {
    let mut ledger = IdempotencyLedger::default();
    let key = IdempotencyLedger::hash_key("cli", "E1");
    assert!(!ledger.check_and_mark(&key, 1000));
}

#[test]
fn second_submission_of_same_key_is_a_duplicate() {
    let mut ledger = IdempotencyLedger::default();
    let key = IdempotencyLedger::hash_key("cli", "E1");
    assert!(!ledger.check_and_mark(&key, 1000));
    assert!(ledger.check_and_mark(&key, 2000));
}

#[test]
fn different_source_same_id_is_a_different_key() {
    let key_cli = IdempotencyLedger::hash_key("cli", "E1");
    let key_slack = IdempotencyLedger::hash_key("slack", "E1");
    assert_ne!(key_cli, key_slack);
}

#[test]
fn prune_removes_only_entries_older_than_ttl() {
    let mut ledger = IdempotencyLedger::default();
    ledger.check_and_mark("old", 0);
    ledger.check_and_mark("fresh", 900);
    let removed = ledger.prune(100, 1000);
    assert_eq!(removed, 1);
    assert_eq!(ledger.len(), 1);
    assert!(ledger.check_and_mark("fresh", 1000)); // still present => duplicate
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("processed_keys.json");
    let mut ledger = IdempotencyLedger::default();
    ledger.check_and_mark("k1", 1000);
    ledger.save(&path).unwrap();

    let mut loaded = IdempotencyLedger::load(&path);
    assert!(loaded.check_and_mark("k1", 2000));
}

#[test]
fn load_missing_or_corrupt_file_is_empty() {
    let dir = tempdir().unwrap();
    assert!(IdempotencyLedger::load(&dir.path().join("missing.json")).is_empty());

    let corrupt = dir.path().join("corrupt.json");
    std::fs::write(&corrupt, b"not json").unwrap();
    assert!(IdempotencyLedger::load(&corrupt).is_empty());
}

proptest! {
    #[test]
    fn no_key_older_than_ttl_survives_prune(ages in proptest::collection::vec(0u64..10_000, 1..50), ttl in 0u64..5_000) {
        let mut ledger = IdempotencyLedger::default();
        let now = 10_000u64;
        for (i, age) in ages.iter().enumerate() {
            let first_seen = now.saturating_sub(*age);
            ledger.check_and_mark(&format!("k{i}"), first_seen);
        }
        ledger.prune(ttl, now);
        let expected_survivors = ages.iter().filter(|age| **age <= ttl).count();
        prop_assert_eq!(ledger.len(), expected_survivors);
    }
}
