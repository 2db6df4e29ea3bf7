// SPDX-License-Identifier: MPL-2.0
//! Bounded FIFO of pending status requests with a single sequential drain.
//!
//! The queue is a cheap-to-clone handle over shared state so a drain can run
//! on a spawned task while the owner keeps enqueueing. Only one drain runs
//! at a time; redundant `process` calls return immediately.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use serde::Serialize;

use super::severity::Severity;
use crate::diagnostics::{DiagnosticsHandle, ErrorEvent, ErrorType, WarningEvent, WarningType};
use crate::domain::status::{DisplayDuration, QueueCapacity};
use crate::error::StatusError;

/// A pending request. Consumed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueItem {
    pub message: String,
    pub severity: Severity,
    pub duration: DisplayDuration,
    pub enqueued_at: Instant,
}

/// Outcome of one [`StatusQueue::process`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DrainSummary {
    /// Items the handler reported as shown.
    pub processed: usize,
    /// Items the handler reported as not shown, or failed on.
    pub failed: usize,
    /// The handler returned an error and the drain stopped early.
    pub halted: bool,
}

#[derive(Debug, Default)]
struct QueueState {
    items: VecDeque<QueueItem>,
    is_processing: bool,
    total_processed: u64,
    total_failed: u64,
}

/// Shared handle to the pending-request queue.
#[derive(Debug, Clone)]
pub struct StatusQueue {
    state: Arc<Mutex<QueueState>>,
    enabled: bool,
    capacity: QueueCapacity,
    diagnostics: Option<DiagnosticsHandle>,
}

impl StatusQueue {
    /// Creates an empty queue holding at most `capacity` requests.
    #[must_use]
    pub fn new(enabled: bool, capacity: QueueCapacity) -> Self {
        Self {
            state: Arc::new(Mutex::new(QueueState::default())),
            enabled,
            capacity,
            diagnostics: None,
        }
    }

    /// Routes rejections and drain failures to `handle`.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    /// Appends a request. Returns `false` if the queue is disabled or full.
    pub fn enqueue(&self, message: &str, severity: Severity, duration: DisplayDuration) -> bool {
        if !self.enabled {
            self.warn("queue is disabled");
            return false;
        }
        let Some(mut state) = self.lock() else {
            return false;
        };
        if state.items.len() >= self.capacity.value() {
            drop(state);
            self.warn(&format!(
                "queue is full ({} pending), request dropped",
                self.capacity.value()
            ));
            return false;
        }
        state.items.push_back(QueueItem {
            message: message.to_string(),
            severity,
            duration,
            enqueued_at: Instant::now(),
        });
        true
    }

    /// Drains the queue front to back through `handler`.
    ///
    /// Returns immediately if a drain is already running or nothing is
    /// pending. After each item with a non-zero duration, waits that long
    /// before popping the next one, unless the queue is now empty. A handler
    /// error stops the drain; remaining items stay queued.
    ///
    /// Once the processing flag is released the queue is checked again, so
    /// an item enqueued while this drain was finishing is not left behind.
    pub async fn process<F, Fut>(&self, mut handler: F) -> DrainSummary
    where
        F: FnMut(QueueItem) -> Fut,
        Fut: Future<Output = Result<bool, StatusError>>,
    {
        let mut summary = DrainSummary::default();

        while self.begin_drain() {
            let guard = DrainGuard {
                state: Arc::clone(&self.state),
            };

            while let Some(item) = self.pop_front() {
                let pause = item.duration;
                match handler(item).await {
                    Ok(true) => {
                        summary.processed += 1;
                        self.tally(true);
                    }
                    Ok(false) => {
                        summary.failed += 1;
                        self.tally(false);
                    }
                    Err(err) => {
                        summary.failed += 1;
                        summary.halted = true;
                        self.tally(false);
                        if let Some(handle) = &self.diagnostics {
                            handle.log_error(
                                ErrorEvent::new(
                                    ErrorType::QueueHandlerFailed,
                                    "queue drain stopped",
                                )
                                .with_cause(err.to_string()),
                            );
                        }
                        break;
                    }
                }

                if !pause.is_indefinite() && !self.is_empty() {
                    tokio::time::sleep(pause.as_duration()).await;
                }
            }

            drop(guard);
            if summary.halted {
                break;
            }
        }

        summary
    }

    /// Claims the processing flag if it is free and work is pending.
    fn begin_drain(&self) -> bool {
        let Some(mut state) = self.lock() else {
            return false;
        };
        if state.is_processing || state.items.is_empty() {
            return false;
        }
        state.is_processing = true;
        true
    }

    /// Drops every pending item and returns how many there were.
    pub fn clear(&self) -> usize {
        self.lock().map_or(0, |mut state| {
            let removed = state.items.len();
            state.items.clear();
            removed
        })
    }

    /// Number of pending requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().map_or(0, |state| state.items.len())
    }

    /// True when nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True while a drain holds the processing flag.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.lock().is_some_and(|state| state.is_processing)
    }

    /// Whether requests are accepted at all.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Most requests that can be pending at once.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity.value()
    }

    /// Lifetime `(processed, failed)` tallies across all drains.
    #[must_use]
    pub fn totals(&self) -> (u64, u64) {
        self.lock()
            .map_or((0, 0), |state| (state.total_processed, state.total_failed))
    }

    /// Lock readable and length within capacity.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        match self.state.lock() {
            Ok(state) => state.items.len() <= self.capacity.value(),
            Err(_) => false,
        }
    }

    fn pop_front(&self) -> Option<QueueItem> {
        self.lock()?.items.pop_front()
    }

    fn tally(&self, shown: bool) {
        if let Some(mut state) = self.lock() {
            if shown {
                state.total_processed += 1;
            } else {
                state.total_failed += 1;
            }
        }
    }

    fn lock(&self) -> Option<MutexGuard<'_, QueueState>> {
        match self.state.lock() {
            Ok(state) => Some(state),
            Err(_) => {
                if let Some(handle) = &self.diagnostics {
                    handle.log_error(ErrorEvent::new(
                        ErrorType::StateCorrupted,
                        "status queue lock poisoned",
                    ));
                }
                None
            }
        }
    }

    fn warn(&self, message: &str) {
        if let Some(handle) = &self.diagnostics {
            handle.log_warning(WarningEvent::new(WarningType::QueueRejected, message));
        }
    }
}

impl Default for StatusQueue {
    fn default() -> Self {
        Self::new(true, QueueCapacity::default())
    }
}

/// Resets `is_processing` when a drain ends, returns early, or is dropped.
struct DrainGuard {
    state: Arc<Mutex<QueueState>>,
}

impl Drop for DrainGuard {
    fn drop(&mut self) {
        let mut state = match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.is_processing = false;
    }
}
