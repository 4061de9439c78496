// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! The thin HTTP boundary: health, event submission, session listing and
//! transcript streaming, approvals, and the opaque orchestrator status map.
//! Every handler here is a translation layer over `aviary-ingress`,
//! `aviary-storage`, and `aviary-supervisor` — no cognitive-kernel or policy
//! logic lives in this crate.

mod error;
mod handlers;
mod router;
mod server;
mod state;

#[cfg(test)]
mod test_support;

pub use error::ApiError;
pub use router::build_router;
pub use server::HttpServer;
pub use state::AppState;
