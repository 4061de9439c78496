// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide panic capture: installs a panic hook once per
//! process and forwards every panic message to the supervisor so it shows
//! up in the daemon's own logs instead of only on stderr.

use std::panic;
use std::sync::Once;
use tokio::sync::mpsc;
use tracing::error;

static INSTALL: Once = Once::new();

/// Install the panic hook and return the receiving end of its channel.
/// Safe to call once per process; a second call is a no-op and its returned
/// receiver will never see a message.
pub fn install() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();

    INSTALL.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let message = info.to_string();
            let _ = tx.send(message);
            previous(info);
        }));
    });

    rx
}

/// Spawn a task that logs every panic message it receives until the channel
/// closes (which only happens if the process is shutting down).
pub fn spawn_logger(mut rx: mpsc::UnboundedReceiver<String>) {
    tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            error!(panic = %message, "captured panic in a supervised task");
        }
    });
}

#[cfg(test)]
#[path = "panic_monitor_tests.rs"]
mod tests;
