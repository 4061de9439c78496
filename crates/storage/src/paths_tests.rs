// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use tempfile::tempdir;

#[test]
fn layout_matches_spec() {
    let root = Path::new("/tmp/aviary-root");
    let paths = WorkspacePaths::new(root, &WorkspaceId::new("w1"));
    assert_eq!(paths.root(), Path::new("/tmp/aviary-root/w1"));
    assert_eq!(paths.lock_file(), Path::new("/tmp/aviary-root/w1/workspace.lock"));
    assert_eq!(paths.session_index(), Path::new("/tmp/aviary-root/w1/sessions/index.json"));
    assert_eq!(paths.transcript("s1"), Path::new("/tmp/aviary-root/w1/sessions/s1.jsonl"));
    assert_eq!(
        paths.processed_keys(),
        Path::new("/tmp/aviary-root/w1/governance/processed_keys.json")
    );
    assert_eq!(paths.scheduler_tasks(), Path::new("/tmp/aviary-root/w1/scheduler/tasks.json"));
    assert_eq!(paths.vector_collection("docs"), Path::new("/tmp/aviary-root/w1/vectors/docs.json"));
}

#[test]
fn create_all_makes_every_directory() {
    let dir = tempdir().unwrap();
    let paths = WorkspacePaths::new(dir.path(), &WorkspaceId::new("w1"));
    paths.create_all().unwrap();
    assert!(paths.sessions_dir().is_dir());
    assert!(paths.governance_dir().is_dir());
    assert!(paths.scheduler_dir().is_dir());
    assert!(paths.vectors_dir().is_dir());
}
