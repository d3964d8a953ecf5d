//! Background task scheduler
//!
//! Owns the alert scan and daily digest tasks. Both run on the tokio runtime
//! until the scheduler is stopped or dropped.

use std::time::Duration;
use chrono::{DateTime, Duration as ChronoDuration, NaiveTime, Utc};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info, warn};
use crate::config::SchedulerConfig;
use crate::services::alerts::AlertScanner;
use crate::services::notification::NotificationDispatcher;

pub struct Scheduler {
    config: SchedulerConfig,
    scanner: AlertScanner,
    dispatcher: NotificationDispatcher,
    handles: Vec<JoinHandle<()>>,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig, scanner: AlertScanner, dispatcher: NotificationDispatcher) -> Self {
        Self {
            config,
            scanner,
            dispatcher,
            handles: Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        !self.handles.is_empty()
    }

    /// Spawn the alert scan and daily digest tasks
    pub fn start(&mut self) {
        if self.is_running() {
            warn!("Scheduler is already running");
            return;
        }

        let scanner = self.scanner.clone();
        let period = self.config.alert_interval();
        self.handles.push(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                if let Err(e) = scanner.run_cycle().await {
                    error!(error = %e, "Alert scan cycle failed");
                }
            }
        }));

        let dispatcher = self.dispatcher.clone();
        let hour = self.config.digest_hour_utc;
        self.handles.push(tokio::spawn(async move {
            loop {
                tokio::time::sleep(duration_until_next(hour, Utc::now())).await;
                if let Err(e) = dispatcher.run_digest().await {
                    error!(error = %e, "Daily digest failed");
                }
            }
        }));

        info!(
            alert_interval_secs = period.as_secs(),
            digest_hour_utc = hour,
            "Started background tasks"
        );
    }

    /// Abort the background tasks
    pub fn stop(&mut self) {
        if self.handles.is_empty() {
            return;
        }
        for handle in self.handles.drain(..) {
            handle.abort();
        }
        info!("Stopped background tasks");
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Time from `now` until the next occurrence of `hour`:00 UTC.
///
/// When `now` is exactly on the hour the next run is a full day away.
pub fn duration_until_next(hour: u32, now: DateTime<Utc>) -> Duration {
    let at = NaiveTime::from_hms_opt(hour.min(23), 0, 0).unwrap_or(NaiveTime::MIN);
    let mut next = now.date_naive().and_time(at).and_utc();
    if next <= now {
        next += ChronoDuration::days(1);
    }

    (next - now).to_std().unwrap_or(Duration::ZERO)
}
