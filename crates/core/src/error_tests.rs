// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn transient_and_conflict_are_retryable() {
    assert!(CoreError::transient("queue full").is_retryable());
    assert!(CoreError::conflict("lease held").is_retryable());
}

#[test]
fn other_variants_are_not_retryable() {
    assert!(!CoreError::duplicate("cli:E1").is_retryable());
    assert!(!CoreError::invalid_input("missing id").is_retryable());
    assert!(!CoreError::not_found("session s1").is_retryable());
    assert!(!CoreError::Internal("boom".into()).is_retryable());
}

#[test]
fn display_messages_include_context() {
    assert_eq!(
        CoreError::duplicate("cli:E1").to_string(),
        "duplicate event: cli:E1"
    );
    assert_eq!(
        CoreError::not_found("session s1").to_string(),
        "not found: session s1"
    );
}

#[test]
fn io_error_converts_via_from() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let core_err: CoreError = io_err.into();
    assert!(matches!(core_err, CoreError::Io(_)));
}
