// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[tokio::test]
async fn second_lock_on_same_session_waits_for_release() {
    let mgr = Arc::new(SessionLockManager::new());
    let concurrent = Arc::new(AtomicUsize::new(0));
    let max_concurrent = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for _ in 0..5 {
        let mgr = Arc::clone(&mgr);
        let concurrent = Arc::clone(&concurrent);
        let max_concurrent = Arc::clone(&max_concurrent);
        handles.push(tokio::spawn(async move {
            let _guard = mgr.lock("s1").await;
            let now = concurrent.fetch_add(1, Ordering::SeqCst) + 1;
            max_concurrent.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            concurrent.fetch_sub(1, Ordering::SeqCst);
        }));
    }
    for h in handles {
        h.await.unwrap();
    }
    assert_eq!(max_concurrent.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn different_sessions_do_not_contend() {
    let mgr = SessionLockManager::new();
    let g1 = mgr.lock("s1").await;
    let g2 = mgr.lock("s2").await;
    drop(g1);
    drop(g2);
    assert_eq!(mgr.tracked_sessions(), 2);
}

#[tokio::test]
async fn dropping_guard_releases_for_next_acquirer() {
    let mgr = SessionLockManager::new();
    {
        let _guard = mgr.lock("s1").await;
    }
    let _guard2 = mgr.lock("s1").await;
}
