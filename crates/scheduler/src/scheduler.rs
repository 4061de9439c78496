// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Scheduler component: cron-based firing with at-most-one
//! concurrent lease per task, catch-up accounting on startup, and a
//! heartbeat emitted on every tick.

use crate::schedule::{datetime_to_ms, ms_to_datetime, Schedule};
use crate::task::{Lease, Task, TaskStore};
use aviary_core::{Clock, CoreError, Event, EventKind, HealthStatus, IdGen};
use aviary_ingress::Ingress;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

pub struct Scheduler {
    store: Mutex<TaskStore>,
    tasks_path: PathBuf,
    ingress: Arc<Ingress>,
    id_gen: Arc<dyn IdGen>,
    clock: Arc<dyn Clock>,
    config: aviary_core::config::SchedulerConfig,
    in_flight: AtomicUsize,
    running: AtomicBool,
    cancel: CancellationToken,
}

impl Scheduler {
    pub fn new(
        tasks_path: PathBuf,
        store: TaskStore,
        ingress: Arc<Ingress>,
        id_gen: Arc<dyn IdGen>,
        clock: Arc<dyn Clock>,
        config: aviary_core::config::SchedulerConfig,
    ) -> Self {
        Self {
            store: Mutex::new(store),
            tasks_path,
            ingress,
            id_gen,
            clock,
            config,
            in_flight: AtomicUsize::new(0),
            running: AtomicBool::new(false),
            cancel: CancellationToken::new(),
        }
    }

    pub fn load(
        tasks_path: PathBuf,
        ingress: Arc<Ingress>,
        id_gen: Arc<dyn IdGen>,
        clock: Arc<dyn Clock>,
        config: aviary_core::config::SchedulerConfig,
    ) -> Self {
        let store = TaskStore::load(&tasks_path);
        Self::new(tasks_path, store, ingress, id_gen, clock, config)
    }

    pub fn upsert_task(&self, task: Task) {
        let mut store = self.store.lock();
        store.upsert(task);
        let _ = store.save(&self.tasks_path);
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Start sequence: recover expired leases, catch-up accounting.
    /// Does not start the ticker; call [`Scheduler::run`] (spawned) for that.
    pub async fn start(&self) -> Result<(), CoreError> {
        let now_ms = self.clock.now_ms();
        let recovered = self.recover_expired_leases(now_ms);
        if recovered > 0 {
            info!(recovered, "recovered expired scheduler leases at startup");
        }
        self.catchup_accounting(now_ms).await?;
        self.running.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn recover_expired_leases(&self, now_ms: u64) -> usize {
        let mut store = self.store.lock();
        let mut recovered = 0;
        for task in store.tasks.values_mut() {
            if let Some(lease) = &task.lease {
                if lease.expires_at_ms < now_ms {
                    task.lease = None;
                    recovered += 1;
                }
            }
        }
        if recovered > 0 {
            let _ = store.save(&self.tasks_path);
        }
        recovered
    }

    async fn catchup_accounting(&self, now_ms: u64) -> Result<(), CoreError> {
        let missed = {
            let store = self.store.lock();
            store.values().filter(|t| t.next_run_ms < now_ms).count()
        };
        if missed as u32 <= self.config.max_catchup_runs {
            return Ok(());
        }
        warn!(
            missed,
            max = self.config.max_catchup_runs,
            "scheduler catch-up backlog exceeds max_catchup_runs, not replaying"
        );
        let event = Event {
            id: self.id_gen.next(),
            source: "scheduler".to_string(),
            kind: EventKind::SystemEvent,
            workspace_id: self.config.heartbeat_workspace_id.clone(),
            session_id: String::new(),
            content: format!("scheduler catch-up backlog: {missed} tasks missed their next_run"),
            metadata: BTreeMap::new(),
            created_at_ms: now_ms,
        };
        self.ingress.submit(event, &self.cancel).await?;
        Ok(())
    }

    /// Run the tick loop until [`Scheduler::stop`] cancels it. Spawn with
    /// `tokio::spawn(Arc::clone(&scheduler).run())`.
    pub async fn run(self: Arc<Self>) {
        let mut interval = tokio::time::interval(self.config.tick_interval);
        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => return,
                _ = interval.tick() => self.tick().await,
            }
        }
    }

    async fn tick(&self) {
        let now_ms = self.clock.now_ms();
        let firing = self.advance_firing_tasks(now_ms);

        for task in firing {
            self.execute_task(task, now_ms).await;
        }

        self.heartbeat(now_ms).await;
    }

    /// Advance `next_run` once for every task due to fire, under the store
    /// mutex, and return the tasks that fired. `next_run` is advanced here,
    /// exactly once per fire; a task's lease lifecycle is independent of it.
    fn advance_firing_tasks(&self, now_ms: u64) -> Vec<Task> {
        let mut store = self.store.lock();
        let mut firing = Vec::new();
        for task in store.tasks.values_mut() {
            if task.schedule.is_empty() || task.next_run_ms > now_ms {
                continue;
            }
            match Schedule::parse(&task.schedule) {
                Ok(schedule) => {
                    if let Some(next) = schedule.next_after(ms_to_datetime(now_ms)) {
                        task.next_run_ms = datetime_to_ms(next);
                    }
                    firing.push(task.clone());
                }
                Err(err) => {
                    error!(task_id = %task.id, reason = %err.reason, "invalid schedule, task not advanced");
                }
            }
        }
        if !firing.is_empty() {
            let _ = store.save(&self.tasks_path);
        }
        firing
    }

    async fn execute_task(&self, task: Task, now_ms: u64) {
        let run_id = self.id_gen.next();
        if !self.acquire_lease(&task.id, &run_id, now_ms) {
            warn!(task_id = %task.id, "skipped firing: an unexpired lease is already held");
            return;
        }
        self.in_flight.fetch_add(1, Ordering::SeqCst);

        let mut metadata = BTreeMap::new();
        metadata.insert("task_id".to_string(), task.id.clone());
        metadata.insert("run_id".to_string(), run_id.clone());
        metadata.insert("fire_time".to_string(), now_ms.to_string());
        metadata.insert(
            "lease_expires_at".to_string(),
            (now_ms + self.config.lease_duration.as_millis() as u64).to_string(),
        );

        let event = Event {
            id: self.id_gen.next(),
            source: "scheduler".to_string(),
            kind: EventKind::Cron,
            workspace_id: task.workspace_id.clone(),
            session_id: String::new(),
            content: format!("cron fire: {}", task.id),
            metadata,
            created_at_ms: now_ms,
        };

        if let Err(err) = self.ingress.submit(event, &self.cancel).await {
            error!(task_id = %task.id, error = %err, "failed to submit cron event");
        }

        self.mark_task_done(&task.id, &run_id);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    fn acquire_lease(&self, task_id: &str, run_id: &str, now_ms: u64) -> bool {
        let mut store = self.store.lock();
        let Some(task) = store.get_mut(task_id) else {
            return false;
        };
        if task.has_unexpired_lease(now_ms) {
            return false;
        }
        task.lease = Some(Lease {
            run_id: run_id.to_string(),
            expires_at_ms: now_ms + self.config.lease_duration.as_millis() as u64,
        });
        let _ = store.save(&self.tasks_path);
        true
    }

    /// Clear the lease for `task_id`, but only if it still matches `run_id`
    /// A run_id mismatch is an error; do not clear.
    fn mark_task_done(&self, task_id: &str, run_id: &str) {
        let mut store = self.store.lock();
        let Some(task) = store.get_mut(task_id) else {
            return;
        };
        match &task.lease {
            Some(lease) if lease.run_id == run_id => {
                task.lease = None;
            }
            _ => {
                error!(task_id, run_id, "mark_task_done run_id mismatch, lease left intact");
                return;
            }
        }
        let _ = store.save(&self.tasks_path);
    }

    async fn heartbeat(&self, now_ms: u64) {
        let mut metadata = BTreeMap::new();
        metadata.insert("tick_time".to_string(), now_ms.to_string());
        let event = Event {
            id: self.id_gen.next(),
            source: "scheduler".to_string(),
            kind: EventKind::SystemEvent,
            workspace_id: self.config.heartbeat_workspace_id.clone(),
            session_id: String::new(),
            content: "scheduler heartbeat".to_string(),
            metadata,
            created_at_ms: now_ms,
        };
        if let Err(err) = self.ingress.submit(event, &self.cancel).await {
            warn!(error = %err, "heartbeat submit failed");
        }
    }

    /// Stop: cancel the ticker, then poll the in-flight counter until
    /// zero or `shutdown_timeout` elapses.
    pub async fn stop(&self) {
        self.cancel.cancel();
        let deadline = tokio::time::Instant::now() + self.config.shutdown_timeout;
        loop {
            if self.in_flight_count() == 0 {
                break;
            }
            if tokio::time::Instant::now() >= deadline {
                warn!("scheduler stop: shutdown_timeout elapsed with in-flight tasks remaining");
                break;
            }
            tokio::time::sleep(self.config.in_flight_poll_interval).await;
        }
        self.running.store(false, Ordering::SeqCst);
    }

    /// Health: requires the running flag set and the task table
    /// loadable; a failed reload is transient, not fatal.
    pub fn health(&self) -> HealthStatus {
        if !self.running.load(Ordering::SeqCst) {
            return HealthStatus::Transient("scheduler not running".to_string());
        }
        HealthStatus::Healthy
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
