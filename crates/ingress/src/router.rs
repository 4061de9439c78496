// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Content-based routing: decide whether an event is a
//! registered command, ordinary pipeline traffic, or dropped by a filter
//! rule, before it ever reaches a queue.

use aviary_core::{CoreError, Event, EventKind};
use std::collections::HashMap;
use std::sync::Arc;

/// A registered command handler, invoked inline by [`Router::route`] when
/// the event's first token matches its registration name.
pub trait CommandHandler: Send + Sync {
    fn handle(&self, event: &Event) -> Result<(), CoreError>;
}

/// A filter predicate consulted before command/pipeline routing. Returning
/// `true` drops the event silently.
pub trait FilterRule: Send + Sync {
    fn should_drop(&self, event: &Event) -> bool;
}

pub enum Destination {
    Pipeline,
    Command(Arc<dyn CommandHandler>),
    Drop,
}

#[derive(Default)]
pub struct Router {
    commands: HashMap<String, Arc<dyn CommandHandler>>,
    filters: Vec<Arc<dyn FilterRule>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_command(&mut self, name: impl Into<String>, handler: Arc<dyn CommandHandler>) {
        self.commands.insert(name.into(), handler);
    }

    pub fn register_filter(&mut self, filter: Arc<dyn FilterRule>) {
        self.filters.push(filter);
    }

    /// Route `event`, re-typing it to `command` in place when its content
    /// looks like a command but matches no registration.
    pub fn route(&self, event: &mut Event) -> Destination {
        if self.filters.iter().any(|f| f.should_drop(event)) {
            return Destination::Drop;
        }

        if let Some(rest) = event.content.strip_prefix('/') {
            let tokens = tokenize(rest);
            if let Some(name) = tokens.first() {
                if let Some(handler) = self.commands.get(name) {
                    return Destination::Command(Arc::clone(handler));
                }
            }
            event.kind = EventKind::Command;
        }

        Destination::Pipeline
    }
}

/// Shell-like whitespace tokenizer honoring single and double quotes.
fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_token = false;

    for ch in input.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None if ch == '\'' || ch == '"' => {
                quote = Some(ch);
                in_token = true;
            }
            None if ch.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(ch);
                in_token = true;
            }
        }
    }
    if in_token {
        tokens.push(current);
    }
    tokens
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
