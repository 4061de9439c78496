// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing setup, ambient to every crate in this workspace but configured
//! once here at the process entry point.

use std::path::Path;

/// Set up a non-blocking daily-rotating file appender plus an
/// `AVIARY_LOG`-filtered stdout mirror for interactive runs. Both layers
/// share one `EnvFilter` built from `filter_directive`. The returned guard
/// must be kept alive for the process lifetime — dropping it stops the
/// background flush thread.
pub fn setup_logging(
    log_dir: &Path,
    filter_directive: &str,
) -> std::io::Result<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::daily(log_dir, "aviaryd.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = || EnvFilter::try_new(filter_directive).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(non_blocking).with_filter(filter()))
        .with(fmt::layer().with_writer(std::io::stdout).with_filter(filter()))
        .init();

    Ok(guard)
}
