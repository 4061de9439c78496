// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn new_lazy_defaults_title_and_status() {
    let meta = SessionMeta::new_lazy(SessionId::new("s1"), 1000);
    assert_eq!(meta.title, "New Session");
    assert_eq!(meta.status, SessionStatus::Active);
    assert_eq!(meta.created_at_ms, 1000);
    assert_eq!(meta.updated_at_ms, 1000);
}

#[test]
fn touch_updates_only_updated_at() {
    let mut meta = SessionMeta::new_lazy(SessionId::new("s1"), 1000);
    meta.touch(2000);
    assert_eq!(meta.created_at_ms, 1000);
    assert_eq!(meta.updated_at_ms, 2000);
}

#[test]
fn status_display() {
    assert_eq!(SessionStatus::Active.to_string(), "active");
    assert_eq!(SessionStatus::Archived.to_string(), "archived");
}

#[test]
fn session_meta_serde_roundtrip() {
    let meta = SessionMeta::new_lazy(SessionId::new("s1"), 1000);
    let json = serde_json::to_string(&meta).unwrap();
    let back: SessionMeta = serde_json::from_str(&json).unwrap();
    assert_eq!(back, meta);
}
