// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Event ingestion: content-based routing, workspace/session resolution,
//! two-lane prioritized dispatch with backpressure, and the per-session
//! mutual-exclusion lock that bounds cognitive turns to one in flight.

mod ingress;
mod resolver;
mod router;
mod session_lock;
mod stores;
mod worker;

pub use ingress::{Ingress, SubmitOutcome};
pub use resolver::Resolver;
pub use router::{CommandHandler, Destination, FilterRule, Router};
pub use session_lock::{SessionLockGuard, SessionLockManager};
pub use stores::WorkspaceStores;
pub use worker::{stop as stop_worker, Worker};
