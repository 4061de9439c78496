// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The normalized [`Event`] type that crosses every boundary in the core.
//!
//! Adapters (Slack, Telegram, CLI, webhook) translate their own wire formats
//! into an `Event` before calling ingress; the core never sees adapter-native
//! payloads.

use crate::session::SessionId;
use crate::workspace::WorkspaceId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Event type discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    UserMessage,
    SystemEvent,
    Command,
    Cron,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventKind::UserMessage => "user_message",
            EventKind::SystemEvent => "system_event",
            EventKind::Command => "command",
            EventKind::Cron => "cron",
        };
        write!(f, "{s}")
    }
}

/// An immutable, normalized unit of work submitted to ingress.
///
/// `id` and `source` together form the idempotency key after routing;
/// `workspace_id` and `session_id` may be empty at submission time and are
/// filled in by the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub source: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub workspace_id: String,
    #[serde(default)]
    pub session_id: String,
    pub content: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    pub created_at_ms: u64,
}

impl Event {
    /// The idempotency key for this event: `source:id`.
    pub fn idempotency_key(&self) -> String {
        format!("{}:{}", self.source, self.id)
    }

    pub fn workspace_id(&self) -> Option<WorkspaceId> {
        if self.workspace_id.is_empty() {
            None
        } else {
            Some(WorkspaceId::new(self.workspace_id.clone()))
        }
    }

    pub fn session_id(&self) -> Option<SessionId> {
        if self.session_id.is_empty() {
            None
        } else {
            Some(SessionId::new(self.session_id.clone()))
        }
    }
}

/// A single line of a session transcript, as persisted to `sessions/<id>.jsonl`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub role: TranscriptRole,
    pub content: String,
    pub timestamp_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptRole {
    User,
    Assistant,
    System,
    Tool,
}

impl TranscriptRecord {
    /// Build the record written by the Worker before invoking the
    /// orchestrator on a `user_message` event.
    pub fn user_event(id: impl Into<String>, content: impl Into<String>, timestamp_ms: u64) -> Self {
        Self {
            id: id.into(),
            kind: "user_event".to_string(),
            role: TranscriptRole::User,
            content: content.into(),
            timestamp_ms,
            name: None,
            tool_call_id: None,
            metadata: None,
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
