// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The StoreWorker: a single-threaded actor fronted by a bounded
//! request channel. Every file mutation under a workspace directory happens
//! inside this actor's loop, giving a total order over writes without
//! per-file locks — the "arena-style ownership" design note.

use crate::approvals::{ApprovalRecord, ApprovalStore};
use crate::file_lock::{FileLock, FileLockConfig};
use crate::idempotency::IdempotencyLedger;
use crate::paths::WorkspacePaths;
use crate::session_index::SessionIndex;
use crate::transcript;
use crate::vectors::{ScoredDoc, VectorCollection, VectorDoc};
use crate::StoreError;
use aviary_core::{Clock, SessionMeta, SystemClock, TranscriptRecord, WorkspaceId};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::{info, warn};

/// How often the actor loop re-prunes the idempotency ledger between
/// requests, independent of `idempotency_ttl_ms`. Keeps a long-lived,
/// low-traffic workspace from accumulating keys forever between restarts.
const PRUNE_INTERVAL: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone)]
pub struct StoreWorkerConfig {
    pub lock: FileLockConfig,
    pub inbox_size: usize,
    pub transcript_rotate_max_bytes: u64,
    pub idempotency_ttl_ms: u64,
}

impl Default for StoreWorkerConfig {
    fn default() -> Self {
        Self {
            lock: FileLockConfig::default(),
            inbox_size: 100,
            transcript_rotate_max_bytes: 10 * 1024 * 1024,
            idempotency_ttl_ms: 24 * 3600 * 1000,
        }
    }
}

enum StoreRequest {
    WriteTranscript {
        session_id: String,
        record: TranscriptRecord,
        reply: oneshot::Sender<Result<(), StoreError>>,
    },
    ReadTranscript {
        session_id: String,
        limit: usize,
        reply: oneshot::Sender<Result<Vec<String>, StoreError>>,
    },
    ReadTranscriptFromOffset {
        session_id: String,
        from: u64,
        reply: oneshot::Sender<Result<(Vec<String>, u64), StoreError>>,
    },
    GetSession {
        session_id: String,
        reply: oneshot::Sender<Option<SessionMeta>>,
    },
    SaveSession {
        meta: SessionMeta,
        reply: oneshot::Sender<Result<(), StoreError>>,
    },
    ResetSession {
        session_id: String,
        reply: oneshot::Sender<Result<(), StoreError>>,
    },
    UpsertVector {
        collection: String,
        doc: VectorDoc,
        reply: oneshot::Sender<Result<(), StoreError>>,
    },
    SearchVectors {
        collection: String,
        query: Vec<f32>,
        k: usize,
        reply: oneshot::Sender<Vec<ScoredDoc>>,
    },
    /// Fire-and-forget: persist the (already-updated) shared ledger.
    SaveIdempotency,
    CreateApproval {
        id: String,
        reason: String,
        now_ms: u64,
        reply: oneshot::Sender<Result<ApprovalRecord, StoreError>>,
    },
    PendingApprovals {
        reply: oneshot::Sender<Vec<ApprovalRecord>>,
    },
    ResolveApproval {
        id: String,
        approve: bool,
        now_ms: u64,
        reply: oneshot::Sender<Result<Option<ApprovalRecord>, StoreError>>,
    },
}

/// A handle to a running StoreWorker. Cloneable; cheap to share across the
/// ingress and worker lanes of a single workspace.
#[derive(Clone)]
pub struct StoreHandle {
    tx: mpsc::Sender<StoreRequest>,
    ledger: Arc<Mutex<IdempotencyLedger>>,
    running: Arc<AtomicBool>,
    lock_held: Arc<AtomicBool>,
}

impl StoreHandle {
    /// `CheckAndMark`: the hot path, called directly from ingress
    /// submission rather than round-tripped through the actor. Schedules a
    /// background persist on first-seen inserts.
    pub fn check_and_mark_idempotent(&self, source: &str, event_id: &str, now_ms: u64) -> bool {
        let key = IdempotencyLedger::hash_key(source, event_id);
        let already_seen = {
            let mut ledger = self.ledger.lock();
            ledger.check_and_mark(&key, now_ms)
        };
        if !already_seen {
            let _ = self.tx.try_send(StoreRequest::SaveIdempotency);
        }
        already_seen
    }

    pub async fn write_transcript(&self, session_id: impl Into<String>, record: TranscriptRecord) -> Result<(), StoreError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(StoreRequest::WriteTranscript {
                session_id: session_id.into(),
                record,
                reply,
            })
            .await
            .map_err(|_| StoreError::WorkerGone)?;
        rx.await.map_err(|_| StoreError::WorkerGone)?
    }

    pub async fn read_transcript(&self, session_id: impl Into<String>, limit: usize) -> Result<Vec<String>, StoreError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(StoreRequest::ReadTranscript {
                session_id: session_id.into(),
                limit,
                reply,
            })
            .await
            .map_err(|_| StoreError::WorkerGone)?;
        rx.await.map_err(|_| StoreError::WorkerGone)?
    }

    /// Read transcript lines appended since byte offset `from`, for the SSE
    /// streaming endpoint: returns the new lines and the offset to resume
    /// polling from on the next call.
    pub async fn read_transcript_from_offset(&self, session_id: impl Into<String>, from: u64) -> Result<(Vec<String>, u64), StoreError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(StoreRequest::ReadTranscriptFromOffset {
                session_id: session_id.into(),
                from,
                reply,
            })
            .await
            .map_err(|_| StoreError::WorkerGone)?;
        rx.await.map_err(|_| StoreError::WorkerGone)?
    }

    pub async fn get_session(&self, session_id: impl Into<String>) -> Option<SessionMeta> {
        let (reply, rx) = oneshot::channel();
        if self
            .tx
            .send(StoreRequest::GetSession {
                session_id: session_id.into(),
                reply,
            })
            .await
            .is_err()
        {
            return None;
        }
        rx.await.ok().flatten()
    }

    pub async fn save_session(&self, meta: SessionMeta) -> Result<(), StoreError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(StoreRequest::SaveSession { meta, reply })
            .await
            .map_err(|_| StoreError::WorkerGone)?;
        rx.await.map_err(|_| StoreError::WorkerGone)?
    }

    pub async fn reset_session(&self, session_id: impl Into<String>) -> Result<(), StoreError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(StoreRequest::ResetSession {
                session_id: session_id.into(),
                reply,
            })
            .await
            .map_err(|_| StoreError::WorkerGone)?;
        rx.await.map_err(|_| StoreError::WorkerGone)?
    }

    pub async fn upsert_vector(&self, collection: impl Into<String>, doc: VectorDoc) -> Result<(), StoreError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(StoreRequest::UpsertVector {
                collection: collection.into(),
                doc,
                reply,
            })
            .await
            .map_err(|_| StoreError::WorkerGone)?;
        rx.await.map_err(|_| StoreError::WorkerGone)?
    }

    pub async fn search_vectors(&self, collection: impl Into<String>, query: Vec<f32>, k: usize) -> Vec<ScoredDoc> {
        let (reply, rx) = oneshot::channel();
        if self
            .tx
            .send(StoreRequest::SearchVectors {
                collection: collection.into(),
                query,
                k,
                reply,
            })
            .await
            .is_err()
        {
            return Vec::new();
        }
        rx.await.unwrap_or_default()
    }

    pub async fn create_approval(&self, id: impl Into<String>, reason: impl Into<String>, now_ms: u64) -> Result<ApprovalRecord, StoreError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(StoreRequest::CreateApproval {
                id: id.into(),
                reason: reason.into(),
                now_ms,
                reply,
            })
            .await
            .map_err(|_| StoreError::WorkerGone)?;
        rx.await.map_err(|_| StoreError::WorkerGone)?
    }

    pub async fn pending_approvals(&self) -> Vec<ApprovalRecord> {
        let (reply, rx) = oneshot::channel();
        if self.tx.send(StoreRequest::PendingApprovals { reply }).await.is_err() {
            return Vec::new();
        }
        rx.await.unwrap_or_default()
    }

    pub async fn resolve_approval(&self, id: impl Into<String>, approve: bool, now_ms: u64) -> Result<Option<ApprovalRecord>, StoreError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(StoreRequest::ResolveApproval {
                id: id.into(),
                approve,
                now_ms,
                reply,
            })
            .await
            .map_err(|_| StoreError::WorkerGone)?;
        rx.await.map_err(|_| StoreError::WorkerGone)?
    }

    /// Health predicate: lock still held, loop still running.
    pub fn is_healthy(&self) -> bool {
        self.running.load(Ordering::SeqCst) && self.lock_held.load(Ordering::SeqCst)
    }
}

struct Actor {
    paths: WorkspacePaths,
    lock: FileLock,
    index: SessionIndex,
    ledger: Arc<Mutex<IdempotencyLedger>>,
    collections: HashMap<String, VectorCollection>,
    approvals: ApprovalStore,
    config: StoreWorkerConfig,
    running: Arc<AtomicBool>,
    lock_held: Arc<AtomicBool>,
}

/// Start a StoreWorker over `workspace_root/workspace_id`, spawning its
/// actor loop on the current Tokio runtime. Startup order: create
/// directories, acquire the file lock, load the session index (tolerating
/// corruption), load and prune the idempotency ledger.
pub async fn start(
    workspace_root: PathBuf,
    workspace_id: WorkspaceId,
    config: StoreWorkerConfig,
    now_ms: u64,
) -> Result<StoreHandle, StoreError> {
    let paths = WorkspacePaths::new(&workspace_root, &workspace_id);
    paths.create_all()?;

    // `FileLock::acquire` retries with `std::thread::sleep` for up to
    // `config.lock.timeout`; run it off the async executor so lock
    // contention on one workspace can't stall the runtime's worker threads.
    let lock = {
        let lock_path = paths.lock_file();
        let lock_config = config.lock.clone();
        tokio::task::spawn_blocking(move || FileLock::acquire(&lock_path, &lock_config))
            .await
            .map_err(|_| StoreError::WorkerGone)??
    };

    let index = SessionIndex::load(&paths.session_index());

    let mut ledger = IdempotencyLedger::load(&paths.processed_keys());
    let pruned = ledger.prune(config.idempotency_ttl_ms, now_ms);
    if pruned > 0 {
        info!(workspace_id = %workspace_id, pruned, "pruned expired idempotency keys at startup");
    }
    ledger.save(&paths.processed_keys())?;
    let ledger = Arc::new(Mutex::new(ledger));

    let approvals = ApprovalStore::load(&paths.approvals());

    let running = Arc::new(AtomicBool::new(true));
    let lock_held = Arc::new(AtomicBool::new(true));

    let (tx, rx) = mpsc::channel(config.inbox_size);

    let actor = Actor {
        paths,
        lock,
        index,
        ledger: Arc::clone(&ledger),
        collections: HashMap::new(),
        approvals,
        config,
        running: Arc::clone(&running),
        lock_held: Arc::clone(&lock_held),
    };

    tokio::spawn(run(actor, rx));

    Ok(StoreHandle {
        tx,
        ledger,
        running,
        lock_held,
    })
}

async fn run(mut actor: Actor, mut rx: mpsc::Receiver<StoreRequest>) {
    let mut prune_tick = tokio::time::interval(PRUNE_INTERVAL);
    prune_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    prune_tick.tick().await; // first tick fires immediately; start() already pruned once

    loop {
        tokio::select! {
            request = rx.recv() => {
                match request {
                    Some(request) => actor.handle(request),
                    // Inbox drained naturally (sender dropped): release the lock and stop.
                    None => break,
                }
            }
            _ = prune_tick.tick() => {
                actor.prune_idempotency();
            }
        }
    }
    actor.lock.release();
    actor.lock_held.store(false, Ordering::SeqCst);
    actor.running.store(false, Ordering::SeqCst);
    info!("store worker shut down");
}

impl Actor {
    fn handle(&mut self, request: StoreRequest) {
        match request {
            StoreRequest::WriteTranscript { session_id, record, reply } => {
                let _ = reply.send(self.write_transcript(&session_id, &record));
            }
            StoreRequest::ReadTranscript { session_id, limit, reply } => {
                let path = self.paths.transcript(&session_id);
                let _ = reply.send(transcript::read_lines(&path, limit));
            }
            StoreRequest::ReadTranscriptFromOffset { session_id, from, reply } => {
                let path = self.paths.transcript(&session_id);
                let _ = reply.send(transcript::read_from_offset(&path, from));
            }
            StoreRequest::GetSession { session_id, reply } => {
                let _ = reply.send(self.index.get(&session_id).cloned());
            }
            StoreRequest::SaveSession { meta, reply } => {
                self.index.upsert(meta);
                let result = self.index.save(&self.paths.session_index());
                let _ = reply.send(result);
            }
            StoreRequest::ResetSession { session_id, reply } => {
                let _ = reply.send(self.reset_session(&session_id));
            }
            StoreRequest::UpsertVector { collection, doc, reply } => {
                let coll = self.collection_mut(&collection);
                coll.upsert(doc);
                let path = self.paths.vector_collection(&collection);
                let result = coll.save(&path);
                let _ = reply.send(result);
            }
            StoreRequest::SearchVectors { collection, query, k, reply } => {
                let results = match self.collections.get(&collection) {
                    Some(coll) => coll.search(&query, k),
                    None => Vec::new(),
                };
                let _ = reply.send(results);
            }
            StoreRequest::SaveIdempotency => {
                let ledger = self.ledger.lock().clone();
                if let Err(err) = ledger.save(&self.paths.processed_keys()) {
                    warn!(error = %err, "failed to persist idempotency ledger, will retry on next mark");
                }
            }
            StoreRequest::CreateApproval { id, reason, now_ms, reply } => {
                let record = self.approvals.create(id, reason, now_ms);
                let result = self.approvals.save(&self.paths.approvals()).map(|()| record);
                let _ = reply.send(result);
            }
            StoreRequest::PendingApprovals { reply } => {
                let _ = reply.send(self.approvals.pending());
            }
            StoreRequest::ResolveApproval { id, approve, now_ms, reply } => {
                let resolved = self.approvals.resolve(&id, approve, now_ms);
                let result = match resolved {
                    Some(record) => self.approvals.save(&self.paths.approvals()).map(|()| Some(record)),
                    None => Ok(None),
                };
                let _ = reply.send(result);
            }
        }
    }

    fn write_transcript(&mut self, session_id: &str, record: &TranscriptRecord) -> Result<(), StoreError> {
        let path = self.paths.transcript(session_id);
        let line = serde_json::to_string(record)?;
        transcript::append_line(&path, &line, self.config.transcript_rotate_max_bytes)?;
        Ok(())
    }

    fn reset_session(&mut self, session_id: &str) -> Result<(), StoreError> {
        let path = self.paths.transcript(session_id);
        match std::fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        self.index.remove(session_id);
        self.index.save(&self.paths.session_index())
    }

    fn prune_idempotency(&mut self) {
        let now_ms = SystemClock.now_ms();
        let pruned = {
            let mut ledger = self.ledger.lock();
            let pruned = ledger.prune(self.config.idempotency_ttl_ms, now_ms);
            if pruned > 0 {
                if let Err(err) = ledger.save(&self.paths.processed_keys()) {
                    warn!(error = %err, "failed to persist idempotency ledger after periodic prune");
                }
            }
            pruned
        };
        if pruned > 0 {
            info!(pruned, "pruned expired idempotency keys");
        }
    }

    fn collection_mut(&mut self, name: &str) -> &mut VectorCollection {
        self.collections
            .entry(name.to_string())
            .or_insert_with(|| VectorCollection::load(&self.paths.vector_collection(name)))
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
