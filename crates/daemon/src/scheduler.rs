// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Periodic pass triggering.
//!
//! The first [`Scheduler::schedule`] call starts a timer task and runs a pass
//! straight away. Later calls hand the task a new period over a watch
//! channel; the task rebuilds its interval so the next tick lands one full
//! new period after the change.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use gb_core::settings::validate_interval;
use gb_ipc::{DaemonRequest, DaemonResponse};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::engine::{Engine, PassResult};
use crate::error::{Error, Result};

struct Timer {
    period: watch::Sender<Duration>,
    task: JoinHandle<()>,
    minutes: u32,
}

pub struct Scheduler {
    engine: Arc<Engine>,
    timer: Mutex<Option<Timer>>,
}

impl Scheduler {
    pub fn new(engine: Arc<Engine>) -> Self {
        Self {
            engine,
            timer: Mutex::new(None),
        }
    }

    fn timer(&self) -> Result<std::sync::MutexGuard<'_, Option<Timer>>> {
        self.timer
            .lock()
            .map_err(|_| Error::Io(std::io::Error::other("scheduler lock poisoned")))
    }

    /// Start or re-arm the periodic trigger. Must be called from within a
    /// tokio runtime.
    pub fn schedule(&self, minutes: i64) -> Result<()> {
        let minutes = validate_interval(minutes)?;
        let period = Duration::from_secs(u64::from(minutes) * 60);
        let mut timer = self.timer()?;

        if let Some(active) = timer.as_mut() {
            active.period.send_replace(period);
            active.minutes = minutes;
            tracing::info!(minutes, "check interval updated");
            return Ok(());
        }

        let (tx, rx) = watch::channel(period);
        let task = tokio::spawn(run_timer(Arc::clone(&self.engine), rx));
        *timer = Some(Timer {
            period: tx,
            task,
            minutes,
        });
        tracing::info!(minutes, "scheduler started");
        Ok(())
    }

    /// Active period in minutes, if the timer is running.
    pub fn interval_minutes(&self) -> Option<u32> {
        self.timer
            .lock()
            .ok()
            .and_then(|t| t.as_ref().map(|t| t.minutes))
    }

    /// Run a pass outside the schedule, queued behind any in-flight pass.
    pub async fn trigger_now(&self) -> Result<PassResult> {
        Ok(self.engine.run_pass().await?)
    }

    /// Handle a pass-related request from the IPC server.
    pub async fn on_external_request(&self, request: DaemonRequest) -> DaemonResponse {
        match request {
            DaemonRequest::CheckNow => match self.trigger_now().await {
                Ok(result) => DaemonResponse::check_ok(result.new_issues),
                Err(e) => {
                    tracing::warn!("on-demand check failed: {e}");
                    DaemonResponse::check_failed(e.to_string())
                }
            },
            DaemonRequest::UpdateInterval { interval } => match self.schedule(interval) {
                Ok(()) => DaemonResponse::interval_ok(),
                Err(e) => DaemonResponse::interval_failed(e.to_string()),
            },
            other => DaemonResponse::Error {
                message: format!("unsupported scheduler request: {other:?}"),
            },
        }
    }

    /// Stop the timer task. In-flight passes are not cancelled.
    pub fn shutdown(&self) {
        if let Ok(mut timer) = self.timer.lock() {
            if let Some(active) = timer.take() {
                active.task.abort();
                tracing::info!("scheduler stopped");
            }
        }
    }
}

async fn scheduled_pass(engine: &Engine) {
    match engine.run_scheduled_pass().await {
        Ok(Some(result)) => {
            tracing::debug!(new_issues = result.new_issues, "scheduled pass finished");
        }
        Ok(None) => {}
        Err(e) => tracing::warn!("scheduled pass failed: {e}"),
    }
}

async fn run_timer(engine: Arc<Engine>, mut period_rx: watch::Receiver<Duration>) {
    scheduled_pass(&engine).await;

    loop {
        let period = *period_rx.borrow_and_update();
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => scheduled_pass(&engine).await,
                changed = period_rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
