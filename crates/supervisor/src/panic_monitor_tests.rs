// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::panic::AssertUnwindSafe;

#[test]
fn installed_hook_forwards_panic_messages() {
    let mut rx = install();

    let _ = panic::catch_unwind(AssertUnwindSafe(|| {
        panic!("boom from panic_monitor test");
    }));

    let message = rx.try_recv().expect("hook should have forwarded a message");
    assert!(message.contains("boom from panic_monitor test"));
}

#[tokio::test]
async fn spawn_logger_drains_messages_without_panicking() {
    let (tx, rx) = mpsc::unbounded_channel();
    tx.send("synthetic panic message".to_string()).unwrap();
    drop(tx);

    spawn_logger(rx);
    tokio::task::yield_now().await;
}
