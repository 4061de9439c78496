// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The daemon's own single-instance guarantee: an advisory lock on a PID
//! file under the state directory, held for the process lifetime. This is
//! distinct from the per-workspace `workspace.lock` file the StoreWorker
//! takes — it guards one thing only, that at most one `aviaryd`
//! process runs per state directory.

use fs2::FileExt;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LockError {
    #[error("another aviaryd is already running (pid {pid})")]
    AlreadyRunning { pid: String },

    #[error("io error acquiring daemon lock: {0}")]
    Io(#[from] std::io::Error),
}

/// Held for the process lifetime; dropping releases the advisory lock. The
/// pid file itself is left in place on drop — its content only matters
/// while the lock is held, and the next successful `acquire` overwrites it.
pub struct DaemonLock {
    _file: File,
    path: PathBuf,
}

impl DaemonLock {
    pub fn acquire(path: PathBuf) -> Result<Self, LockError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new().write(true).create(true).truncate(false).open(&path)?;
        if file.try_lock_exclusive().is_err() {
            let pid = std::fs::read_to_string(&path).unwrap_or_default().trim().to_string();
            return Err(LockError::AlreadyRunning { pid });
        }

        let mut file = file;
        file.set_len(0)?;
        writeln!(file, "{}", std::process::id())?;

        Ok(Self { _file: file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
