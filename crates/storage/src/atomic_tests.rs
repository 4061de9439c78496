// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde::{Deserialize, Serialize};
use tempfile::tempdir;

#[derive(Serialize, Deserialize)]
struct Sample {
    a: u32,
}

#[test]
fn write_atomic_creates_parent_dirs() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested/deep/file.json");
    write_atomic(&path, b"hello").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
}

#[test]
fn write_atomic_leaves_no_tmp_file_behind() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("file.json");
    write_atomic(&path, b"data").unwrap();
    assert!(!tmp_path_for(&path).exists());
}

#[test]
fn write_atomic_overwrites_existing_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("file.json");
    write_atomic(&path, b"first").unwrap();
    write_atomic(&path, b"second").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "second");
}

#[test]
fn write_json_atomic_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sample.json");
    write_json_atomic(&path, &Sample { a: 7 }).unwrap();
    let back: Sample = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(back.a, 7);
}
