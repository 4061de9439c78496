// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Atomic whole-file writes: write-to-temp, fsync, rename, fsync the parent
//! directory so the rename itself is durable. Used by the session index, the
//! idempotency ledger, and the scheduler task table — every piece of state
//! in a workspace that is rewritten wholesale rather than appended to.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Atomically (over)write `path` with `contents`.
///
/// Fsyncs the temp file before renaming and fsyncs the parent directory
/// after renaming, so a crash cannot observe a renamed-but-not-durable
/// directory entry.
pub fn write_atomic(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let tmp_path = tmp_path_for(path);
    {
        let mut file = File::create(&tmp_path)?;
        file.write_all(contents)?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, path)?;

    if let Ok(dir) = File::open(parent) {
        let _ = dir.sync_all();
    }
    Ok(())
}

/// Atomically (over)write `path` with the pretty-printed JSON of `value`.
pub fn write_json_atomic<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), crate::StoreError> {
    let contents = serde_json::to_vec_pretty(value)?;
    write_atomic(path, &contents)?;
    Ok(())
}

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("tmp");
    path.with_file_name(format!("{file_name}.tmp"))
}

#[cfg(test)]
#[path = "atomic_tests.rs"]
mod tests;
