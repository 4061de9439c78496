// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Per-workspace filesystem persistence: atomic writes, advisory locking,
//! and the single-writer StoreWorker actor that serializes every mutation
//! under a workspace directory.

mod approvals;
mod atomic;
mod error;
mod file_lock;
mod idempotency;
mod listing;
mod paths;
mod session_index;
mod transcript;
mod vectors;
mod worker;

pub use approvals::{ApprovalRecord, ApprovalStore};
pub use atomic::{write_atomic, write_json_atomic};
pub use error::StoreError;
pub use file_lock::{cleanup_stale_locks, FileLock, FileLockConfig};
pub use idempotency::IdempotencyLedger;
pub use listing::list_sessions_reconciled;
pub use paths::WorkspacePaths;
pub use session_index::SessionIndex;
pub use transcript::{append_line, read_from_offset, read_lines};
pub use vectors::{ScoredDoc, VectorCollection, VectorDoc};
pub use worker::{start, StoreHandle, StoreWorkerConfig};
