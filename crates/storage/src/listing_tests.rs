// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use aviary_core::WorkspaceId;
use tempfile::tempdir;

#[test]
fn lists_indexed_sessions() {
    let dir = tempdir().unwrap();
    let paths = WorkspacePaths::new(dir.path(), &WorkspaceId::new("ws"));
    paths.create_all().unwrap();

    let mut index = SessionIndex::default();
    index.upsert(SessionMeta::new_lazy(SessionId::new("s1"), 1_000));
    index.save(&paths.session_index()).unwrap();

    let sessions = list_sessions_reconciled(&paths);
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].id, SessionId::new("s1"));
}

#[test]
fn recovers_session_with_transcript_but_no_index_entry() {
    let dir = tempdir().unwrap();
    let paths = WorkspacePaths::new(dir.path(), &WorkspaceId::new("ws"));
    paths.create_all().unwrap();

    crate::transcript::append_line(&paths.transcript("orphan"), "{}", 10 * 1024 * 1024).unwrap();

    let sessions = list_sessions_reconciled(&paths);
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].id, SessionId::new("orphan"));
    assert_eq!(sessions[0].title, "Recovered session");
}

#[test]
fn indexed_entry_takes_precedence_over_recovery() {
    let dir = tempdir().unwrap();
    let paths = WorkspacePaths::new(dir.path(), &WorkspaceId::new("ws"));
    paths.create_all().unwrap();

    let mut index = SessionIndex::default();
    index.upsert(SessionMeta::new_lazy(SessionId::new("s1"), 1_000));
    index.save(&paths.session_index()).unwrap();
    crate::transcript::append_line(&paths.transcript("s1"), "{}", 10 * 1024 * 1024).unwrap();

    let sessions = list_sessions_reconciled(&paths);
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].title, "New Session");
}

#[test]
fn empty_workspace_lists_nothing() {
    let dir = tempdir().unwrap();
    let paths = WorkspacePaths::new(dir.path(), &WorkspaceId::new("ws"));
    paths.create_all().unwrap();

    assert!(list_sessions_reconciled(&paths).is_empty());
}
