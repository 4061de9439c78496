// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-session append-only transcripts with size-based rotation.
//!
//! Invariants upheld here:
//! (i) the active file only ever grows via `append`;
//! (ii) rotation (`rename` + recreate empty) happens before a write would
//!      push the file past the configured threshold, so the reader never
//!      observes a file mid-rotation;
//! (iii) every line written is standalone valid JSON.

use crate::StoreError;
use chrono::Utc;
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

/// Append `line` (without a trailing newline; one is added) to the
/// transcript at `path`, rotating first if the file is already at or past
/// `rotate_max_bytes`.
///
/// Returns `true` if a rotation occurred before this write.
pub fn append_line(path: &Path, line: &str, rotate_max_bytes: u64) -> Result<bool, StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let rotated = maybe_rotate(path, rotate_max_bytes)?;

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(line.as_bytes())?;
    file.write_all(b"\n")?;
    file.sync_all()?;
    Ok(rotated)
}

/// Rotate `path` to `<path>.<UTC-timestamp>.bak` if it exists and its size is
/// `>= rotate_max_bytes`. The active path is recreated empty by the next
/// `append_line` call (an absent file and an empty file are equivalent).
fn maybe_rotate(path: &Path, rotate_max_bytes: u64) -> Result<bool, StoreError> {
    let Ok(meta) = std::fs::metadata(path) else {
        return Ok(false);
    };
    if meta.len() < rotate_max_bytes {
        return Ok(false);
    }
    let timestamp = Utc::now().format("%Y%m%d%H%M%S");
    let bak_path = path.with_extension(format!("jsonl.{timestamp}.bak"));
    std::fs::rename(path, &bak_path)?;
    Ok(true)
}

/// Read transcript lines. With `limit == 0`, returns every line; otherwise
/// returns at most the last `limit` lines. A missing file returns empty.
pub fn read_lines(path: &Path, limit: usize) -> Result<Vec<String>, StoreError> {
    let Ok(file) = std::fs::File::open(path) else {
        return Ok(Vec::new());
    };
    let reader = BufReader::new(file);
    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line?);
    }
    if limit > 0 && lines.len() > limit {
        let start = lines.len() - limit;
        lines.drain(..start);
    }
    Ok(lines)
}

/// Read transcript lines starting at byte offset `from`, for the SSE
/// streaming endpoint: new content since the last poll.
pub fn read_from_offset(path: &Path, from: u64) -> Result<(Vec<String>, u64), StoreError> {
    use std::io::{Seek, SeekFrom};
    let Ok(mut file) = std::fs::File::open(path) else {
        return Ok((Vec::new(), from));
    };
    let len = file.metadata()?.len();
    if from >= len {
        return Ok((Vec::new(), len));
    }
    file.seek(SeekFrom::Start(from))?;
    let reader = BufReader::new(file);
    let mut lines = Vec::new();
    for line in reader.lines() {
        lines.push(line?);
    }
    Ok((lines, len))
}

#[cfg(test)]
#[path = "transcript_tests.rs"]
mod tests;
