// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The schedule grammar: standard 5-field cron, plus a hand-rolled
//! `@every <duration>` fast path that bypasses the cron evaluator entirely.

use chrono::{DateTime, TimeZone, Utc};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid schedule {spec:?}: {reason}")]
pub struct ScheduleError {
    pub spec: String,
    pub reason: String,
}

pub enum Schedule {
    Cron(cron::Schedule),
    Every(Duration),
}

impl Schedule {
    /// Parse a schedule spec. `@every 10s` style specs take the fast path;
    /// everything else is treated as standard 5-field cron (`M H D Mon DoW`),
    /// adapted to the `cron` crate's 6-field (seconds-first) grammar by
    /// prepending a `0` seconds field.
    pub fn parse(spec: &str) -> Result<Self, ScheduleError> {
        let spec = spec.trim();
        if let Some(rest) = spec.strip_prefix("@every ") {
            let duration = humantime::parse_duration(rest.trim()).map_err(|e| ScheduleError {
                spec: spec.to_string(),
                reason: e.to_string(),
            })?;
            return Ok(Schedule::Every(duration));
        }

        let field_count = spec.split_whitespace().count();
        if field_count != 5 {
            return Err(ScheduleError {
                spec: spec.to_string(),
                reason: format!("expected 5 cron fields, got {field_count}"),
            });
        }

        let six_field = format!("0 {spec}");
        let parsed = cron::Schedule::from_str(&six_field).map_err(|e| ScheduleError {
            spec: spec.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Schedule::Cron(parsed))
    }

    /// The next instant strictly after `after`.
    pub fn next_after(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Schedule::Cron(schedule) => schedule.after(&after).next(),
            Schedule::Every(duration) => chrono::Duration::from_std(*duration).ok().map(|d| after + d),
        }
    }
}

pub fn ms_to_datetime(ms: u64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ms as i64).single().unwrap_or_else(Utc::now)
}

pub fn datetime_to_ms(dt: DateTime<Utc>) -> u64 {
    dt.timestamp_millis().max(0) as u64
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
