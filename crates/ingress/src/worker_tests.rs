// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use aviary_core::EventKind;
use aviary_storage::StoreWorkerConfig;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::tempdir;

struct CountingOrchestrator {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

#[async_trait]
impl Orchestrator for CountingOrchestrator {
    async fn execute(&self, _event: &Event) -> Result<(), CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CoreError::invalid_input("boom"));
        }
        Ok(())
    }
}

fn event(id: &str, kind: EventKind, workspace_id: &str, session_id: &str, content: &str) -> Event {
    Event {
        id: id.into(),
        source: "cli".into(),
        kind,
        workspace_id: workspace_id.into(),
        session_id: session_id.into(),
        content: content.into(),
        metadata: Default::default(),
        created_at_ms: 1_000,
    }
}

#[tokio::test]
async fn user_message_persists_transcript_then_invokes_orchestrator() {
    let dir = tempdir().unwrap();
    let stores = Arc::new(WorkspaceStores::new(dir.path().to_path_buf(), StoreWorkerConfig::default()));
    let calls = Arc::new(AtomicUsize::new(0));
    let orchestrator = Arc::new(CountingOrchestrator {
        calls: Arc::clone(&calls),
        fail: false,
    });
    let locks = Arc::new(SessionLockManager::new());
    let worker = Worker::new("interactive", orchestrator, locks, Arc::clone(&stores));

    let (tx, rx) = mpsc::channel(8);
    let handle = worker.spawn(rx);

    tx.send(event("e1", EventKind::UserMessage, "default", "s1", "hello"))
        .await
        .unwrap();
    drop(tx);
    stop(handle, Duration::from_secs(5)).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let store = stores.get_or_start(&WorkspaceId::new("default"), 1_000).await.unwrap();
    let lines = store.read_transcript("s1", 10).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("hello"));
}

#[tokio::test]
async fn orchestrator_error_does_not_stop_the_loop() {
    let dir = tempdir().unwrap();
    let stores = Arc::new(WorkspaceStores::new(dir.path().to_path_buf(), StoreWorkerConfig::default()));
    let calls = Arc::new(AtomicUsize::new(0));
    let orchestrator = Arc::new(CountingOrchestrator {
        calls: Arc::clone(&calls),
        fail: true,
    });
    let locks = Arc::new(SessionLockManager::new());
    let worker = Worker::new("interactive", orchestrator, locks, stores);

    let (tx, rx) = mpsc::channel(8);
    let handle = worker.spawn(rx);

    for i in 0..3 {
        tx.send(event(&format!("e{i}"), EventKind::UserMessage, "default", "s1", "hi"))
            .await
            .unwrap();
    }
    drop(tx);
    stop(handle, Duration::from_secs(5)).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn event_missing_session_id_is_dropped_without_orchestrator_call() {
    let dir = tempdir().unwrap();
    let stores = Arc::new(WorkspaceStores::new(dir.path().to_path_buf(), StoreWorkerConfig::default()));
    let calls = Arc::new(AtomicUsize::new(0));
    let orchestrator = Arc::new(CountingOrchestrator {
        calls: Arc::clone(&calls),
        fail: false,
    });
    let locks = Arc::new(SessionLockManager::new());
    let worker = Worker::new("interactive", orchestrator, locks, stores);

    let (tx, rx) = mpsc::channel(8);
    let handle = worker.spawn(rx);
    tx.send(event("e1", EventKind::UserMessage, "default", "", "hi"))
        .await
        .unwrap();
    drop(tx);
    stop(handle, Duration::from_secs(5)).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
