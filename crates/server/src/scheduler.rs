// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Recurring status reconciliation.
//!
//! The scheduler runs the same reconciliation routine the inline
//! per-request check uses, once per day at a fixed wall-clock time in a
//! configured timezone. It is an explicit component with its own
//! start/stop lifecycle, independent of the process entry point:
//! `start()` spawns the loop, `stop()` signals a watch channel and
//! awaits the task.
//!
//! ## Invariants
//!
//! - The next fire time is computed from wall-clock time in the
//!   configured timezone; a local time skipped by a DST transition
//!   rolls forward to the next valid day, and an ambiguous one resolves
//!   to its earliest instant.
//! - A failing sweep is logged and never ends the loop; the next
//!   scheduled run still occurs.
//! - Overlapping runs are harmless: the routine is idempotent over
//!   current state.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use nutritrack_api::reconcile_statuses;
use nutritrack_persistence::Persistence;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Errors raised while configuring the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// The timezone name is not a valid IANA identifier.
    InvalidTimezone(String),
    /// The wall-clock time is out of range.
    InvalidTime {
        /// The configured hour.
        hour: u32,
        /// The configured minute.
        minute: u32,
    },
}

impl std::fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimezone(name) => write!(f, "Invalid timezone: '{name}'"),
            Self::InvalidTime { hour, minute } => {
                write!(f, "Invalid sweep time: {hour:02}:{minute:02}")
            }
        }
    }
}

impl std::error::Error for SchedulerError {}

/// Configuration for the daily reconciliation sweep.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// IANA timezone name the wall-clock time is interpreted in.
    pub timezone: String,
    /// Hour of day (0-23) to fire at.
    pub hour: u32,
    /// Minute (0-59) to fire at.
    pub minute: u32,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            timezone: String::from("UTC"),
            hour: 2,
            minute: 0,
        }
    }
}

impl SweepConfig {
    /// Resolves and validates the configured timezone and time.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown timezone name or an out-of-range
    /// wall-clock time.
    pub fn resolve(&self) -> Result<(Tz, NaiveTime), SchedulerError> {
        let tz: Tz = self
            .timezone
            .parse()
            .map_err(|_| SchedulerError::InvalidTimezone(self.timezone.clone()))?;
        let time: NaiveTime =
            NaiveTime::from_hms_opt(self.hour, self.minute, 0).ok_or(SchedulerError::InvalidTime {
                hour: self.hour,
                minute: self.minute,
            })?;
        Ok((tz, time))
    }
}

/// Computes the next UTC instant strictly after `now` at which the
/// configured wall-clock time occurs in the given timezone.
///
/// Walks forward day by day so a DST-skipped local time lands on the
/// next day it exists; an ambiguous local time (clocks falling back)
/// resolves to its earliest instant.
#[must_use]
pub fn next_run_after(now: DateTime<Utc>, tz: Tz, time: NaiveTime) -> DateTime<Utc> {
    let mut date: NaiveDate = now.with_timezone(&tz).date_naive();

    // Two iterations suffice in practice; a few more cover pathological
    // transitions without risking an unbounded walk.
    for _ in 0..4 {
        if let Some(candidate) = tz.from_local_datetime(&date.and_time(time)).earliest() {
            let candidate_utc: DateTime<Utc> = candidate.with_timezone(&Utc);
            if candidate_utc > now {
                return candidate_utc;
            }
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    now + chrono::Duration::hours(24)
}

/// Runs one reconciliation sweep against the shared store.
///
/// Failures are logged; the caller's loop continues regardless.
pub async fn run_sweep(persistence: &Arc<Mutex<Persistence>>) {
    let mut store = persistence.lock().await;
    match reconcile_statuses(&mut store) {
        Ok(summary) => {
            info!(
                swept = summary.swept,
                completed = summary.completed,
                failed = summary.failed,
                "Scheduled status reconciliation finished"
            );
        }
        Err(e) => {
            error!(error = %e, "Scheduled status reconciliation failed");
        }
    }
}

/// Daily status reconciliation scheduler.
///
/// Runs in the background and flips finished beneficiaries to the
/// `completed` status once per day at the configured wall-clock time.
pub struct ReconciliationScheduler {
    /// The shared store.
    persistence: Arc<Mutex<Persistence>>,
    /// The resolved timezone.
    tz: Tz,
    /// The resolved wall-clock fire time.
    time: NaiveTime,
    /// Shutdown signal sender.
    shutdown_tx: watch::Sender<bool>,
    /// Shutdown signal receiver.
    shutdown_rx: watch::Receiver<bool>,
}

impl ReconciliationScheduler {
    /// Creates a new scheduler.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not resolve.
    pub fn new(
        persistence: Arc<Mutex<Persistence>>,
        config: &SweepConfig,
    ) -> Result<Self, SchedulerError> {
        let (tz, time) = config.resolve()?;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Ok(Self {
            persistence,
            tz,
            time,
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Starts the scheduler in a background task.
    ///
    /// Returns a handle that can be used to stop it.
    #[must_use]
    pub fn start(self) -> SchedulerHandle {
        let shutdown_tx: watch::Sender<bool> = self.shutdown_tx.clone();

        let handle: JoinHandle<()> = tokio::spawn(async move {
            self.run_loop().await;
        });

        SchedulerHandle {
            shutdown_tx,
            task_handle: handle,
        }
    }

    /// Runs the sweep loop until a shutdown signal arrives.
    async fn run_loop(self) {
        let mut shutdown_rx: watch::Receiver<bool> = self.shutdown_rx.clone();

        info!(
            timezone = %self.tz,
            time = %self.time,
            "Status reconciliation scheduler started"
        );

        loop {
            let now: DateTime<Utc> = Utc::now();
            let next: DateTime<Utc> = next_run_after(now, self.tz, self.time);
            let wait: std::time::Duration = (next - now)
                .to_std()
                .unwrap_or(std::time::Duration::from_secs(60));

            info!(next_run = %next, "Next status reconciliation scheduled");

            tokio::select! {
                () = tokio::time::sleep(wait) => {
                    run_sweep(&self.persistence).await;
                }
                _ = shutdown_rx.changed() => {
                    info!("Status reconciliation scheduler stopping");
                    break;
                }
            }
        }
    }
}

/// Handle to a running [`ReconciliationScheduler`].
pub struct SchedulerHandle {
    /// Shutdown signal sender.
    shutdown_tx: watch::Sender<bool>,
    /// The background task.
    task_handle: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Signals the scheduler to stop and waits for the task to finish.
    pub async fn stop(self) {
        let _ = self.shutdown_tx.send(true);
        let _ = self.task_handle.await;
    }
}
