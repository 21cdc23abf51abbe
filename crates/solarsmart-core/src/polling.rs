// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! Live twin poller.
//!
//! Keeps a [`LiveSummary`] snapshot for the active location fresh by
//! re-fetching it on a fixed period. A location change drops the current
//! snapshot and any fetch still in flight, then starts over immediately.
//! Results are only committed while their location version is still current
//! and the poller has not been stopped.

use crate::client::SolarApi;
use crate::selector::{Selection, SelectorContext};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use solarsmart_types::LiveSummary;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info, warn};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollPhase {
    /// No location selected
    #[default]
    Idle,
    /// First fetch for the location, nothing to show yet
    Loading,
    /// Snapshot shown, nothing in flight
    Ready,
    /// Snapshot shown while a background fetch is in flight
    Refreshing,
    /// Torn down
    Stopped,
}

/// Everything the UI needs to render the live view
#[derive(Debug, Clone, Default)]
pub struct PollState {
    pub phase: PollPhase,
    /// Location the snapshot and current cycle belong to
    pub selection: Option<Selection>,
    pub snapshot: Option<LiveSummary>,
    /// Message of the last failed fetch, cleared by the next success
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
    /// Number of snapshots committed since start
    pub commits: u64,
}

impl PollState {
    /// A fetch is in flight
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, PollPhase::Loading | PollPhase::Refreshing)
    }

    /// Last good snapshot shown alongside an error indicator
    pub fn is_degraded(&self) -> bool {
        self.snapshot.is_some() && self.error.is_some()
    }

    /// Underperformance alert, suppressed while refreshing
    pub fn show_underperformance_alert(&self) -> bool {
        self.phase != PollPhase::Refreshing
            && self
                .snapshot
                .as_ref()
                .is_some_and(LiveSummary::underperforming)
    }
}

/// Periodic fetcher of the live twin summary
pub struct PollingScheduler {
    api: Arc<dyn SolarApi>,
    selector: SelectorContext,
    period: Duration,
}

impl std::fmt::Debug for PollingScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PollingScheduler")
            .field("api", &self.api.name())
            .field("period", &self.period)
            .finish_non_exhaustive()
    }
}

impl PollingScheduler {
    pub fn new(api: Arc<dyn SolarApi>, selector: SelectorContext, period: Duration) -> Self {
        Self {
            api,
            selector,
            period,
        }
    }

    /// Spawn the polling task on the current tokio runtime.
    ///
    /// The returned handle must be stopped with [`PollHandle::stop`]; dropping
    /// it leaves the task running.
    pub fn start(&self) -> PollHandle {
        let (state_tx, _) = watch::channel(PollState::default());
        let state = Arc::new(state_tx);

        let worker = PollWorker {
            api: self.api.clone(),
            selections: self.selector.subscribe(),
            state: state.clone(),
            period: self.period.max(Duration::from_millis(1)),
        };

        info!(
            "🔄 [POLL] Starting live poller every {}s",
            self.period.as_secs_f64()
        );
        let task = tokio::spawn(worker.run());

        PollHandle {
            state,
            task: Mutex::new(Some(task)),
        }
    }
}

/// Cancellation handle of a running poller
#[must_use = "the poller keeps running until stop() is called"]
#[derive(Debug)]
pub struct PollHandle {
    state: Arc<watch::Sender<PollState>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl PollHandle {
    /// Cancel the timer and any fetch in flight.
    ///
    /// After this returns no further snapshot is committed. Calling it again
    /// is a no-op.
    pub fn stop(&self) {
        let stopped_now = self.state.send_if_modified(|s| {
            if s.phase == PollPhase::Stopped {
                return false;
            }
            s.phase = PollPhase::Stopped;
            true
        });

        if let Some(task) = self.task.lock().take() {
            task.abort();
        }

        if stopped_now {
            info!("🛑 [POLL] Live poller stopped");
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.state.borrow().phase == PollPhase::Stopped
    }

    pub fn state(&self) -> PollState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state transition
    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.state.subscribe()
    }
}

enum CycleOutcome {
    Completed,
    /// The location changed mid-flight
    Superseded,
    /// Selector gone, nothing left to poll
    Closed,
}

struct PollWorker {
    api: Arc<dyn SolarApi>,
    selections: watch::Receiver<Selection>,
    state: Arc<watch::Sender<PollState>>,
    period: Duration,
}

impl PollWorker {
    async fn run(mut self) {
        loop {
            let selection = self.selections.borrow_and_update().clone();

            if selection.is_empty() {
                self.update(|s| {
                    s.phase = PollPhase::Idle;
                    s.selection = None;
                    s.snapshot = None;
                    s.error = None;
                });
                debug!("[POLL] No location selected, idling");
                if self.selections.changed().await.is_err() {
                    return;
                }
                continue;
            }

            info!("🔄 [POLL] Loading live data for '{}'", selection.location);
            self.update(|s| {
                s.phase = PollPhase::Loading;
                s.selection = Some(selection.clone());
                s.snapshot = None;
                s.error = None;
            });

            // Ticks are anchored to the start of the first cycle
            let started = Instant::now();
            match self.cycle(&selection).await {
                CycleOutcome::Completed => {}
                CycleOutcome::Superseded => continue,
                CycleOutcome::Closed => return,
            }

            let mut ticker = interval_at(started + self.period, self.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    changed = self.selections.changed() => {
                        if changed.is_err() {
                            warn!("[POLL] Location selector dropped, stopping poller");
                            return;
                        }
                        break;
                    }
                    _ = ticker.tick() => {
                        match self.cycle(&selection).await {
                            CycleOutcome::Completed => {}
                            CycleOutcome::Superseded => break,
                            CycleOutcome::Closed => return,
                        }
                    }
                }
            }
        }
    }

    /// Fetch once for `selection` and commit the result if still current
    async fn cycle(&mut self, selection: &Selection) -> CycleOutcome {
        self.update(|s| {
            if s.snapshot.is_some() {
                s.phase = PollPhase::Refreshing;
            }
        });

        let api = self.api.clone();
        let location = selection.location.clone();
        let fetch = async move { api.twin_summary(&location).await };

        tokio::select! {
            result = fetch => {
                self.commit(selection, result.map_err(|e| e.to_string()));
                CycleOutcome::Completed
            }
            changed = self.selections.changed() => {
                debug!(
                    "[POLL] Location changed while fetching '{}', dropping request",
                    selection.location
                );
                if changed.is_err() {
                    CycleOutcome::Closed
                } else {
                    CycleOutcome::Superseded
                }
            }
        }
    }

    fn commit(&self, selection: &Selection, result: Result<LiveSummary, String>) {
        if self.selections.borrow().version != selection.version {
            debug!(
                "[POLL] Discarding stale result for '{}' (v{})",
                selection.location, selection.version
            );
            return;
        }

        self.state.send_if_modified(|s| {
            if s.phase == PollPhase::Stopped || s.selection.as_ref() != Some(selection) {
                return false;
            }

            match result {
                Ok(summary) => {
                    debug!("[POLL] Snapshot committed for '{}'", selection.location);
                    s.snapshot = Some(summary);
                    s.error = None;
                    s.phase = PollPhase::Ready;
                    s.last_updated = Some(Utc::now());
                    s.commits += 1;
                }
                Err(message) => {
                    warn!(
                        "⚠️ [POLL] Live data fetch for '{}' failed: {}",
                        selection.location, message
                    );
                    s.error = Some(message);
                    s.phase = if s.snapshot.is_some() {
                        PollPhase::Ready
                    } else {
                        PollPhase::Loading
                    };
                }
            }
            true
        });
    }

    /// Apply `f` unless the poller has been stopped
    fn update(&self, f: impl FnOnce(&mut PollState)) {
        self.state.send_if_modified(|s| {
            if s.phase == PollPhase::Stopped {
                return false;
            }
            f(s);
            true
        });
    }
}
