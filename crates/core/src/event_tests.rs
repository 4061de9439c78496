// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn sample_event() -> Event {
    Event {
        id: "E1".to_string(),
        source: "cli".to_string(),
        kind: EventKind::UserMessage,
        workspace_id: String::new(),
        session_id: String::new(),
        content: "hi".to_string(),
        metadata: BTreeMap::new(),
        created_at_ms: 1000,
    }
}

#[test]
fn idempotency_key_is_source_colon_id() {
    assert_eq!(sample_event().idempotency_key(), "cli:E1");
}

#[test]
fn empty_workspace_and_session_are_none() {
    let e = sample_event();
    assert_eq!(e.workspace_id(), None);
    assert_eq!(e.session_id(), None);
}

#[test]
fn non_empty_workspace_and_session_parse() {
    let mut e = sample_event();
    e.workspace_id = "w1".to_string();
    e.session_id = "s1".to_string();
    assert_eq!(e.workspace_id().unwrap().as_str(), "w1");
    assert_eq!(e.session_id().unwrap().as_str(), "s1");
}

#[test]
fn event_kind_display() {
    assert_eq!(EventKind::UserMessage.to_string(), "user_message");
    assert_eq!(EventKind::SystemEvent.to_string(), "system_event");
    assert_eq!(EventKind::Command.to_string(), "command");
    assert_eq!(EventKind::Cron.to_string(), "cron");
}

#[test]
fn event_serde_roundtrip_uses_type_field() {
    let e = sample_event();
    let json = serde_json::to_string(&e).unwrap();
    assert!(json.contains("\"type\":\"user_message\""));
    let back: Event = serde_json::from_str(&json).unwrap();
    assert_eq!(back, e);
}

#[test]
fn transcript_record_user_event_shape() {
    let rec = TranscriptRecord::user_event("r1", "hello", 5000);
    assert_eq!(rec.kind, "user_event");
    assert_eq!(rec.role, TranscriptRole::User);
    assert_eq!(rec.content, "hello");
    assert!(rec.name.is_none());
}

#[test]
fn transcript_record_serde_omits_none_fields() {
    let rec = TranscriptRecord::user_event("r1", "hello", 5000);
    let json = serde_json::to_string(&rec).unwrap();
    assert!(!json.contains("tool_call_id"));
    assert!(!json.contains("\"name\""));
}
