// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! aviary-supervisor: dependency-ordered component lifecycle management and
//! process-wide panic capture.

mod component;
mod graph;
mod panic_monitor;
mod supervisor;

pub use component::Component;
pub use graph::{topo_sort, GraphError};
pub use panic_monitor::{install as install_panic_hook, spawn_logger as spawn_panic_logger};
pub use supervisor::Supervisor;
