// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime configuration: the enumerated environment inputs,
//! resolved once at daemon startup into a typed [`RuntimeConfig`] and
//! threaded by reference into every component constructor.
//!
//! Loading never panics: missing variables fall back to documented
//! defaults, malformed values produce a [`ConfigError`].

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no home directory available to resolve default state dir")]
    NoHomeDir,

    #[error("invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub lock_timeout: Duration,
    pub lock_retry: Duration,
    pub lock_max_retry: u32,
    pub inbox_size: usize,
    pub transcript_rotate_max_bytes: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            lock_timeout: Duration::from_secs(5),
            lock_retry: Duration::from_millis(100),
            lock_max_retry: 50,
            inbox_size: 100,
            transcript_rotate_max_bytes: 10 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IngressConfig {
    pub interactive_queue_size: usize,
    pub background_queue_size: usize,
    pub interactive_submit_timeout: Duration,
    pub drain_timeout: Duration,
    pub drain_poll_interval: Duration,
    pub idempotency_ttl: Duration,
}

impl Default for IngressConfig {
    fn default() -> Self {
        Self {
            interactive_queue_size: 100,
            background_queue_size: 100,
            interactive_submit_timeout: Duration::from_millis(500),
            drain_timeout: Duration::from_secs(10),
            drain_poll_interval: Duration::from_millis(50),
            idempotency_ttl: Duration::from_secs(24 * 3600),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub shutdown_timeout: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            shutdown_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub tick_interval: Duration,
    pub lease_duration: Duration,
    pub shutdown_timeout: Duration,
    pub max_catchup_runs: u32,
    pub in_flight_poll_interval: Duration,
    pub heartbeat_workspace_id: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(60),
            lease_duration: Duration::from_secs(5 * 60),
            shutdown_timeout: Duration::from_secs(10),
            max_catchup_runs: 10,
            in_flight_poll_interval: Duration::from_millis(100),
            heartbeat_workspace_id: "default".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub shutdown_timeout: Duration,
    pub health_check_interval: Duration,
    pub startup_shutdown_timeout: Duration,
    pub preflight_timeout: Duration,
    pub stale_lock_ttl: Duration,
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            shutdown_timeout: Duration::from_secs(30),
            health_check_interval: Duration::from_secs(15),
            startup_shutdown_timeout: Duration::from_secs(10),
            preflight_timeout: Duration::from_secs(5),
            stale_lock_ttl: Duration::from_secs(24 * 3600),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub port: u16,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
    pub idle_timeout: Duration,
    pub shutdown_timeout: Duration,
    /// Interval between transcript re-reads on the session SSE stream.
    pub sse_poll_interval: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8787,
            read_timeout: Duration::from_secs(10),
            write_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(120),
            shutdown_timeout: Duration::from_secs(10),
            sse_poll_interval: Duration::from_millis(400),
        }
    }
}

/// The fully resolved runtime configuration, assembled once at daemon
/// startup and threaded by reference into every component.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub workspace_root: PathBuf,
    pub default_workspace_id: String,
    pub store: StoreConfig,
    pub ingress: IngressConfig,
    pub worker: WorkerConfig,
    pub scheduler: SchedulerConfig,
    pub daemon: DaemonConfig,
    pub http: HttpConfig,
    pub log_dir: PathBuf,
    pub log_filter: String,
}

impl RuntimeConfig {
    /// Load configuration from environment variables, falling back to
    /// documented defaults. Never panics; malformed durations/ints produce a
    /// [`ConfigError`] rather than a mid-run panic.
    pub fn load() -> Result<Self, ConfigError> {
        let workspace_root = match std::env::var("AVIARY_STATE_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => default_state_dir()?.join("workspaces"),
        };
        let log_dir = workspace_root
            .parent()
            .map(|p| p.join("logs"))
            .unwrap_or_else(|| workspace_root.join("logs"));

        Ok(Self {
            default_workspace_id: env_string("AVIARY_DEFAULT_WORKSPACE", "default"),
            store: StoreConfig {
                lock_timeout: env_duration_ms("AVIARY_LOCK_TIMEOUT_MS", StoreConfig::default().lock_timeout)?,
                lock_retry: env_duration_ms("AVIARY_LOCK_RETRY_MS", StoreConfig::default().lock_retry)?,
                lock_max_retry: env_u32("AVIARY_LOCK_MAX_RETRY", StoreConfig::default().lock_max_retry)?,
                inbox_size: env_usize("AVIARY_STORE_INBOX_SIZE", StoreConfig::default().inbox_size)?,
                transcript_rotate_max_bytes: env_u64(
                    "AVIARY_TRANSCRIPT_ROTATE_MAX_BYTES",
                    StoreConfig::default().transcript_rotate_max_bytes,
                )?,
            },
            ingress: IngressConfig {
                interactive_queue_size: env_usize(
                    "AVIARY_INTERACTIVE_QUEUE_SIZE",
                    IngressConfig::default().interactive_queue_size,
                )?,
                background_queue_size: env_usize(
                    "AVIARY_BACKGROUND_QUEUE_SIZE",
                    IngressConfig::default().background_queue_size,
                )?,
                interactive_submit_timeout: env_duration_ms(
                    "AVIARY_INTERACTIVE_SUBMIT_TIMEOUT_MS",
                    IngressConfig::default().interactive_submit_timeout,
                )?,
                drain_timeout: env_duration_ms("AVIARY_DRAIN_TIMEOUT_MS", IngressConfig::default().drain_timeout)?,
                drain_poll_interval: env_duration_ms(
                    "AVIARY_DRAIN_POLL_INTERVAL_MS",
                    IngressConfig::default().drain_poll_interval,
                )?,
                idempotency_ttl: env_duration_ms("AVIARY_IDEMPOTENCY_TTL_MS", IngressConfig::default().idempotency_ttl)?,
            },
            worker: WorkerConfig {
                shutdown_timeout: env_duration_ms(
                    "AVIARY_WORKER_SHUTDOWN_TIMEOUT_MS",
                    WorkerConfig::default().shutdown_timeout,
                )?,
            },
            scheduler: SchedulerConfig {
                tick_interval: env_duration_ms("AVIARY_SCHEDULER_TICK_MS", SchedulerConfig::default().tick_interval)?,
                lease_duration: env_duration_ms(
                    "AVIARY_SCHEDULER_LEASE_MS",
                    SchedulerConfig::default().lease_duration,
                )?,
                shutdown_timeout: env_duration_ms(
                    "AVIARY_SCHEDULER_SHUTDOWN_TIMEOUT_MS",
                    SchedulerConfig::default().shutdown_timeout,
                )?,
                max_catchup_runs: env_u32(
                    "AVIARY_SCHEDULER_MAX_CATCHUP_RUNS",
                    SchedulerConfig::default().max_catchup_runs,
                )?,
                in_flight_poll_interval: env_duration_ms(
                    "AVIARY_SCHEDULER_POLL_MS",
                    SchedulerConfig::default().in_flight_poll_interval,
                )?,
                heartbeat_workspace_id: env_string("AVIARY_HEARTBEAT_WORKSPACE", "default"),
            },
            daemon: DaemonConfig {
                shutdown_timeout: env_duration_ms("AVIARY_DAEMON_SHUTDOWN_TIMEOUT_MS", DaemonConfig::default().shutdown_timeout)?,
                health_check_interval: env_duration_ms(
                    "AVIARY_HEALTH_CHECK_INTERVAL_MS",
                    DaemonConfig::default().health_check_interval,
                )?,
                startup_shutdown_timeout: env_duration_ms(
                    "AVIARY_STARTUP_SHUTDOWN_TIMEOUT_MS",
                    DaemonConfig::default().startup_shutdown_timeout,
                )?,
                preflight_timeout: env_duration_ms("AVIARY_PREFLIGHT_TIMEOUT_MS", DaemonConfig::default().preflight_timeout)?,
                stale_lock_ttl: env_duration_ms("AVIARY_STALE_LOCK_TTL_MS", DaemonConfig::default().stale_lock_ttl)?,
            },
            http: HttpConfig {
                port: env_u16("AVIARY_HTTP_PORT", HttpConfig::default().port)?,
                read_timeout: env_duration_ms("AVIARY_HTTP_READ_TIMEOUT_MS", HttpConfig::default().read_timeout)?,
                write_timeout: env_duration_ms("AVIARY_HTTP_WRITE_TIMEOUT_MS", HttpConfig::default().write_timeout)?,
                idle_timeout: env_duration_ms("AVIARY_HTTP_IDLE_TIMEOUT_MS", HttpConfig::default().idle_timeout)?,
                shutdown_timeout: env_duration_ms("AVIARY_HTTP_SHUTDOWN_TIMEOUT_MS", HttpConfig::default().shutdown_timeout)?,
                sse_poll_interval: env_duration_ms("AVIARY_HTTP_SSE_POLL_INTERVAL_MS", HttpConfig::default().sse_poll_interval)?,
            },
            log_filter: env_string("AVIARY_LOG", "info"),
            log_dir,
            workspace_root,
        })
    }
}

fn default_state_dir() -> Result<PathBuf, ConfigError> {
    if let Ok(xdg) = std::env::var("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("aviary"));
    }
    let home = std::env::var("HOME").map_err(|_| ConfigError::NoHomeDir)?;
    Ok(PathBuf::from(home).join(".aviary"))
}

fn env_string(var: &'static str, default: &str) -> String {
    std::env::var(var).unwrap_or_else(|_| default.to_string())
}

fn env_duration_ms(var: &'static str, default: Duration) -> Result<Duration, ConfigError> {
    match std::env::var(var) {
        Err(_) => Ok(default),
        Ok(value) => value
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| ConfigError::InvalidValue {
                var,
                value,
                reason: e.to_string(),
            }),
    }
}

fn env_usize(var: &'static str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(var) {
        Err(_) => Ok(default),
        Ok(value) => value.parse::<usize>().map_err(|e| ConfigError::InvalidValue {
            var,
            value,
            reason: e.to_string(),
        }),
    }
}

fn env_u32(var: &'static str, default: u32) -> Result<u32, ConfigError> {
    match std::env::var(var) {
        Err(_) => Ok(default),
        Ok(value) => value.parse::<u32>().map_err(|e| ConfigError::InvalidValue {
            var,
            value,
            reason: e.to_string(),
        }),
    }
}

fn env_u64(var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(var) {
        Err(_) => Ok(default),
        Ok(value) => value.parse::<u64>().map_err(|e| ConfigError::InvalidValue {
            var,
            value,
            reason: e.to_string(),
        }),
    }
}

fn env_u16(var: &'static str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(var) {
        Err(_) => Ok(default),
        Ok(value) => value.parse::<u16>().map_err(|e| ConfigError::InvalidValue {
            var,
            value,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
