// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;
use std::time::Duration;

fn clear_all_env() {
    for (key, _) in std::env::vars() {
        if key.starts_with("AVIARY_") {
            std::env::remove_var(key);
        }
    }
}

#[test]
#[serial]
fn load_falls_back_to_documented_defaults() {
    clear_all_env();
    std::env::set_var("HOME", "/tmp/aviary-config-test-home");
    let cfg = RuntimeConfig::load().unwrap();
    assert_eq!(cfg.default_workspace_id, "default");
    assert_eq!(cfg.store.inbox_size, 100);
    assert_eq!(cfg.ingress.interactive_submit_timeout, Duration::from_millis(500));
    assert_eq!(cfg.scheduler.tick_interval, Duration::from_secs(60));
    assert_eq!(cfg.http.port, 8787);
    std::env::remove_var("HOME");
}

#[test]
#[serial]
fn state_dir_override_is_honored() {
    clear_all_env();
    std::env::set_var("AVIARY_STATE_DIR", "/tmp/aviary-override");
    let cfg = RuntimeConfig::load().unwrap();
    assert_eq!(cfg.workspace_root, PathBuf::from("/tmp/aviary-override"));
    std::env::remove_var("AVIARY_STATE_DIR");
}

#[test]
#[serial]
fn malformed_duration_is_a_typed_error_not_a_panic() {
    clear_all_env();
    std::env::set_var("HOME", "/tmp/aviary-config-test-home");
    std::env::set_var("AVIARY_SCHEDULER_TICK_MS", "not-a-number");
    let result = RuntimeConfig::load();
    assert!(matches!(result, Err(ConfigError::InvalidValue { var: "AVIARY_SCHEDULER_TICK_MS", .. })));
    std::env::remove_var("AVIARY_SCHEDULER_TICK_MS");
    std::env::remove_var("HOME");
}

#[test]
#[serial]
fn xdg_state_home_takes_precedence_over_home() {
    clear_all_env();
    std::env::set_var("HOME", "/tmp/aviary-config-test-home");
    std::env::set_var("XDG_STATE_HOME", "/tmp/xdg-state");
    let cfg = RuntimeConfig::load().unwrap();
    assert_eq!(cfg.workspace_root, PathBuf::from("/tmp/xdg-state/aviary/workspaces"));
    std::env::remove_var("XDG_STATE_HOME");
    std::env::remove_var("HOME");
}
