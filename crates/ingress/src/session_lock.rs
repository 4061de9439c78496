// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Session Lock Manager: the single-flight primitive guaranteeing
//! at-most-one in-flight cognitive turn per session.
//!
//! A lazily populated map from session id to a per-session mutex. `lock`
//! allocates the entry on first use and returns a guard; dropping the guard
//! is the unlock, enforced by the type system instead of caller discipline.

use parking_lot::Mutex as SyncMutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

#[derive(Default)]
pub struct SessionLockManager {
    locks: SyncMutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

/// Held while a session's turn is in flight. Releases on drop.
pub struct SessionLockGuard {
    _guard: OwnedMutexGuard<()>,
}

impl SessionLockManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `session_id`, allocating its mutex if this is
    /// the first request for that session. Blocks until available.
    pub async fn lock(&self, session_id: &str) -> SessionLockGuard {
        let mutex = {
            let mut locks = self.locks.lock();
            Arc::clone(
                locks
                    .entry(session_id.to_string())
                    .or_insert_with(|| Arc::new(AsyncMutex::new(()))),
            )
        };
        SessionLockGuard {
            _guard: mutex.lock_owned().await,
        }
    }

    /// Number of sessions with an allocated lock entry (for diagnostics/tests).
    pub fn tracked_sessions(&self) -> usize {
        self.locks.lock().len()
    }
}

#[cfg(test)]
#[path = "session_lock_tests.rs"]
mod tests;
