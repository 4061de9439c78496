// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-workspace exclusive advisory file lock.
//!
//! Cross-process mutual exclusion via `fs2`'s OS-level advisory locking,
//! matching the lock-acquisition idiom used by the daemon's own startup
//! sequence.

use crate::StoreError;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct FileLockConfig {
    pub timeout: Duration,
    pub retry_interval: Duration,
    pub max_retries: u32,
}

impl Default for FileLockConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            retry_interval: Duration::from_millis(100),
            max_retries: 50,
        }
    }
}

/// A held lock. Releasing is idempotent and logs the held duration; both
/// happen automatically on drop, but callers may call [`FileLock::release`]
/// explicitly to control timing (e.g. before further cleanup).
pub struct FileLock {
    file: Option<File>,
    path: PathBuf,
    acquired_at: Instant,
    released: bool,
}

impl FileLock {
    /// Acquire the exclusive lock at `path`, retrying up to `max_retries`
    /// times (or until `timeout` elapses, whichever comes first).
    pub fn acquire(path: &Path, config: &FileLockConfig) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)?;

        let deadline = Instant::now() + config.timeout;
        let mut attempts = 0u32;
        loop {
            match file.try_lock_exclusive() {
                Ok(()) => {
                    info!(path = %path.display(), "acquired workspace file lock");
                    return Ok(Self {
                        file: Some(file),
                        path: path.to_path_buf(),
                        acquired_at: Instant::now(),
                        released: false,
                    });
                }
                Err(_) if attempts >= config.max_retries || Instant::now() >= deadline => {
                    return Err(StoreError::Locked {
                        workspace_id: path.display().to_string(),
                    });
                }
                Err(_) => {
                    attempts += 1;
                    std::thread::sleep(config.retry_interval);
                }
            }
        }
    }

    /// Release the lock. Safe to call more than once.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        if let Some(file) = self.file.take() {
            let _ = fs2::FileExt::unlock(&file);
        }
        self.released = true;
        info!(
            path = %self.path.display(),
            held_ms = self.acquired_at.elapsed().as_millis(),
            "released workspace file lock",
        );
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        self.release();
    }
}

/// Remove lock files under `base_path` older than `max_age`, only when
/// `force` is set; otherwise warns about each stale candidate without
/// removing it. Intended to run once during daemon preflight.
pub fn cleanup_stale_locks(base_path: &Path, max_age: Duration, force: bool) -> std::io::Result<usize> {
    let mut removed = 0;
    if !base_path.is_dir() {
        return Ok(0);
    }
    for workspace_entry in std::fs::read_dir(base_path)? {
        let workspace_entry = workspace_entry?;
        if !workspace_entry.file_type()?.is_dir() {
            continue;
        }
        let lock_path = workspace_entry.path().join("workspace.lock");
        let Ok(meta) = std::fs::metadata(&lock_path) else {
            continue;
        };
        let age = meta
            .modified()
            .ok()
            .and_then(|m| SystemTime::now().duration_since(m).ok())
            .unwrap_or_default();
        if age <= max_age {
            continue;
        }
        if force {
            std::fs::remove_file(&lock_path)?;
            removed += 1;
            info!(path = %lock_path.display(), age_secs = age.as_secs(), "removed stale workspace lock");
        } else {
            warn!(path = %lock_path.display(), age_secs = age.as_secs(), "stale workspace lock found (force not set, not removed)");
        }
    }
    Ok(removed)
}

#[cfg(test)]
#[path = "file_lock_tests.rs"]
mod tests;
