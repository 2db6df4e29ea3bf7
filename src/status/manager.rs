// SPDX-License-Identifier: MPL-2.0
//! Status manager: the public face of the status subsystem.
//!
//! Decides between immediate display and queueing, keeps [`DisplayState`] in
//! step with what the surface actually shows, records history, and exposes
//! statistics and a self-check for the diagnostics report.
//!
//! The manager is a cheap-to-clone handle. Timer callbacks and queue drains
//! only hold a weak reference, so dropping every handle tears everything
//! down.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tokio::runtime::Handle;

use super::history::{HistoryEntry, HistoryQuery, SeverityCounts, StatusHistory};
use super::queue::{DrainSummary, QueueItem, StatusQueue};
use super::renderer::Renderer;
use super::severity::Severity;
use super::surface::SurfaceHandle;
use crate::config::StatusConfig;
use crate::diagnostics::{DiagnosticsHandle, ErrorEvent, ErrorType, WarningEvent, WarningType};
use crate::domain::status::{DisplayDuration, HistoryCapacity, QueueCapacity};
use crate::error::StatusError;

// =============================================================================
// Display State
// =============================================================================

/// What the manager believes is on screen.
///
/// Visible exactly when both a severity and a message are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    current_severity: Option<Severity>,
    current_message: Option<String>,
    is_visible: bool,
}

impl DisplayState {
    fn show(&mut self, message: &str, severity: Severity) {
        self.current_severity = Some(severity);
        self.current_message = Some(message.to_string());
        self.is_visible = true;
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether a message is currently shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    /// Severity of the shown message.
    #[must_use]
    pub fn current_severity(&self) -> Option<Severity> {
        self.current_severity
    }

    /// Text of the shown message.
    #[must_use]
    pub fn current_message(&self) -> Option<&str> {
        self.current_message.as_deref()
    }

    /// Visible iff severity and message are both present.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.is_visible == (self.current_severity.is_some() && self.current_message.is_some())
    }
}

// =============================================================================
// Reports
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusStatistics {
    /// Entries currently held by the history ledger.
    pub total_displayed: usize,
    pub by_severity: SeverityCounts,
    pub queue_length: usize,
    pub is_visible: bool,
    pub current_severity: Option<Severity>,
    /// RFC 3339 time of the last successful display.
    pub last_displayed_at: Option<String>,
    pub is_processing: bool,
    pub queue_processed: u64,
    pub queue_failed: u64,
}

/// Result of [`StatusManager::validate_state`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub timestamp: String,
}

impl ValidationReport {
    fn from_issues(issues: Vec<String>) -> Self {
        Self {
            is_valid: issues.is_empty(),
            issues,
            timestamp: now_rfc3339(),
        }
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

// =============================================================================
// Status Manager
// =============================================================================

struct ManagerState {
    renderer: Renderer,
    display: DisplayState,
    history: StatusHistory,
    last_displayed_at: Option<String>,
    destroyed: bool,
}

struct Shared {
    state: Mutex<ManagerState>,
    queue: StatusQueue,
    config: StatusConfig,
    default_duration: DisplayDuration,
    /// Runtime current at construction, for drains started off-runtime.
    runtime: Option<Handle>,
    diagnostics: Option<DiagnosticsHandle>,
}

impl Shared {
    fn lock_state(&self) -> Option<MutexGuard<'_, ManagerState>> {
        match self.state.lock() {
            Ok(state) => Some(state),
            Err(_) => {
                self.log_error(
                    ErrorEvent::new(ErrorType::StateCorrupted, "status manager lock poisoned"),
                );
                None
            }
        }
    }

    /// Renders now, then records the display and arms auto-hide.
    fn display_now(
        this: &Arc<Self>,
        state: &mut ManagerState,
        message: &str,
        severity: Severity,
        duration: DisplayDuration,
    ) -> bool {
        if !state.renderer.display(message, severity) {
            return false;
        }

        state.display.show(message, severity);
        state.history.add(severity, message, duration);
        state.last_displayed_at = Some(now_rfc3339());

        if !duration.is_indefinite() {
            let weak = Arc::downgrade(this);
            let armed = state
                .renderer
                .schedule_hide(duration.as_duration(), move || {
                    if let Some(shared) = weak.upgrade() {
                        shared.hide();
                    }
                });
            if !armed {
                this.log_warning(WarningEvent::new(
                    WarningType::AutoHideUnavailable,
                    format!(
                        "no async runtime for a {} ms auto-hide; status stays until hidden",
                        duration.as_millis()
                    ),
                ));
            }
        }

        this.log("status displayed", format!("severity={severity}"));
        true
    }

    fn hide(&self) -> bool {
        let Some(mut state) = self.lock_state() else {
            return false;
        };
        if !state.renderer.hide() {
            return false;
        }
        state.display.clear();
        true
    }

    /// Queue handler: shows one dequeued item.
    fn display_queued(weak: &Weak<Self>, item: QueueItem) -> Result<bool, StatusError> {
        let shared = weak.upgrade().ok_or(StatusError::Destroyed)?;
        let Some(mut state) = shared.lock_state() else {
            return Ok(false);
        };
        if state.destroyed {
            return Err(StatusError::Destroyed);
        }
        Ok(Self::display_now(
            &shared,
            &mut state,
            &item.message,
            item.severity,
            item.duration,
        ))
    }

    fn log(&self, message: &str, details: String) {
        if let Some(handle) = &self.diagnostics {
            handle.log(message, Some(details));
        }
    }

    fn log_warning(&self, event: WarningEvent) {
        if let Some(handle) = &self.diagnostics {
            handle.log_warning(event);
        }
    }

    fn log_error(&self, event: ErrorEvent) {
        if let Some(handle) = &self.diagnostics {
            handle.log_error(event);
        }
    }
}

/// Coordinates the renderer, history ledger and queue.
#[derive(Clone)]
pub struct StatusManager {
    shared: Arc<Shared>,
}

impl std::fmt::Debug for StatusManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusManager")
            .field("config", &self.shared.config)
            .field("queue", &self.shared.queue)
            .finish_non_exhaustive()
    }
}

impl StatusManager {
    /// Builds a manager from the status settings.
    ///
    /// When called inside a tokio runtime, that runtime also hosts timers
    /// and drains started later from threads outside it.
    #[must_use]
    pub fn new(
        config: &StatusConfig,
        surface: Option<SurfaceHandle>,
        diagnostics: Option<DiagnosticsHandle>,
    ) -> Self {
        let mut renderer = Renderer::new(None);
        let mut queue = StatusQueue::new(
            config.enable_queue,
            QueueCapacity::new(config.max_queue_size),
        );
        if let Some(handle) = &diagnostics {
            renderer.set_diagnostics(handle.clone());
            queue.set_diagnostics(handle.clone());
        }
        if let Some(surface) = surface {
            renderer.set_element(surface);
        }
        let runtime = Handle::try_current().ok();
        if let Some(runtime) = &runtime {
            renderer.set_runtime(runtime.clone());
        }

        let history = StatusHistory::new(
            config.enable_history,
            HistoryCapacity::new(config.max_history_size),
        );

        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(ManagerState {
                    renderer,
                    display: DisplayState::default(),
                    history,
                    last_displayed_at: None,
                    destroyed: false,
                }),
                queue,
                config: *config,
                default_duration: DisplayDuration::from_millis(config.default_duration_ms),
                runtime,
                diagnostics,
            }),
        }
    }

    /// Shows `message`, or queues it if something is already visible.
    ///
    /// `None` uses the configured default duration; a zero duration keeps the
    /// message until [`hide_status`](Self::hide_status).
    ///
    /// Auto-hide needs a tokio runtime, either the current one or the one
    /// current at construction. Without one the message is still shown and
    /// recorded, an `AutoHideUnavailable` warning is logged, and it stays
    /// until [`hide_status`](Self::hide_status).
    ///
    /// Returns `Ok(false)` when nothing could be shown or queued: no usable
    /// surface, the queue is disabled while a message is visible, or the
    /// queue is full.
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::EmptyMessage`] for an empty message.
    /// Whitespace-only text is shown as given.
    pub fn show_status(
        &self,
        message: &str,
        severity: Severity,
        duration: Option<DisplayDuration>,
    ) -> Result<bool, StatusError> {
        if message.is_empty() {
            return Err(StatusError::EmptyMessage);
        }
        let duration = duration.unwrap_or(self.shared.default_duration);

        let Some(mut state) = self.shared.lock_state() else {
            return Ok(false);
        };
        if state.destroyed || !state.renderer.has_element() {
            self.shared.log_error(ErrorEvent::new(
                ErrorType::SurfaceUnavailable,
                "no display surface bound",
            ));
            return Ok(false);
        }

        if state.display.is_visible() {
            drop(state);
            if !self.shared.queue.is_enabled() {
                self.shared.log_warning(WarningEvent::new(
                    WarningType::QueueRejected,
                    "status dropped: a message is visible and queueing is disabled",
                ));
                return Ok(false);
            }
            let queued = self.shared.queue.enqueue(message, severity, duration);
            if queued {
                self.spawn_drain();
            }
            return Ok(queued);
        }

        Ok(Shared::display_now(
            &self.shared,
            &mut state,
            message,
            severity,
            duration,
        ))
    }

    /// Like [`show_status`](Self::show_status) with a textual severity.
    ///
    /// Unknown names fall back to [`Severity::Info`].
    ///
    /// # Errors
    ///
    /// Returns [`StatusError::EmptyMessage`] for an empty message.
    pub fn show_status_named(
        &self,
        message: &str,
        severity: &str,
        duration: Option<DisplayDuration>,
    ) -> Result<bool, StatusError> {
        let severity = Severity::from_name(severity).unwrap_or_else(|| {
            self.shared.log_warning(WarningEvent::new(
                WarningType::SeverityNormalized,
                format!("unknown severity {severity:?}, using info"),
            ));
            Severity::Info
        });
        self.show_status(message, severity, duration)
    }

    /// # Errors
    ///
    /// Returns [`StatusError::EmptyMessage`] for an empty message.
    pub fn show_success(
        &self,
        message: &str,
        duration: Option<DisplayDuration>,
    ) -> Result<bool, StatusError> {
        self.show_status(message, Severity::Success, duration)
    }

    /// # Errors
    ///
    /// Returns [`StatusError::EmptyMessage`] for an empty message.
    pub fn show_error(
        &self,
        message: &str,
        duration: Option<DisplayDuration>,
    ) -> Result<bool, StatusError> {
        self.show_status(message, Severity::Error, duration)
    }

    /// # Errors
    ///
    /// Returns [`StatusError::EmptyMessage`] for an empty message.
    pub fn show_warning(
        &self,
        message: &str,
        duration: Option<DisplayDuration>,
    ) -> Result<bool, StatusError> {
        self.show_status(message, Severity::Warning, duration)
    }

    /// # Errors
    ///
    /// Returns [`StatusError::EmptyMessage`] for an empty message.
    pub fn show_info(
        &self,
        message: &str,
        duration: Option<DisplayDuration>,
    ) -> Result<bool, StatusError> {
        self.show_status(message, Severity::Info, duration)
    }

    /// Clears the surface. On failure the display state is left as is.
    ///
    /// A pending auto-hide stays armed.
    pub fn hide_status(&self) -> bool {
        self.shared.hide()
    }

    /// Drains the queue through the immediate-display routine.
    ///
    /// A no-op while another drain is running.
    pub async fn process_queue(&self) -> DrainSummary {
        let queue = self.shared.queue.clone();
        let weak = Arc::downgrade(&self.shared);
        queue
            .process(move |item| std::future::ready(Shared::display_queued(&weak, item)))
            .await
    }

    fn spawn_drain(&self) {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(err) => match self.shared.runtime.clone() {
                Some(runtime) => runtime,
                None => {
                    self.shared.log_error(
                        ErrorEvent::new(ErrorType::TimerUnavailable, "cannot start queue drain")
                            .with_cause(err.to_string()),
                    );
                    return;
                }
            },
        };
        let queue = self.shared.queue.clone();
        let weak = Arc::downgrade(&self.shared);
        runtime.spawn(async move {
            queue
                .process(move |item| std::future::ready(Shared::display_queued(&weak, item)))
                .await
        });
    }

    /// Rebinds the display surface. Ignored once destroyed.
    pub fn set_surface(&self, surface: SurfaceHandle) -> bool {
        let Some(mut state) = self.shared.lock_state() else {
            return false;
        };
        if state.destroyed {
            return false;
        }
        state.renderer.set_element(surface);
        true
    }

    /// Ledger entries matching `query`, oldest first.
    #[must_use]
    pub fn get_history(&self, query: HistoryQuery) -> Vec<HistoryEntry> {
        self.shared
            .lock_state()
            .map_or_else(Vec::new, |state| state.history.get(query))
    }

    /// Returns how many entries were removed.
    pub fn clear_history(&self) -> usize {
        self.shared
            .lock_state()
            .map_or(0, |mut state| state.history.clear())
    }

    /// `None` if internal state is corrupted.
    #[must_use]
    pub fn get_statistics(&self) -> Option<StatusStatistics> {
        let state = self.shared.lock_state()?;
        let (queue_processed, queue_failed) = self.shared.queue.totals();

        Some(StatusStatistics {
            total_displayed: state.history.len(),
            by_severity: state.history.counts(),
            queue_length: self.shared.queue.len(),
            is_visible: state.display.is_visible(),
            current_severity: state.display.current_severity(),
            last_displayed_at: state.last_displayed_at.clone(),
            is_processing: self.shared.queue.is_processing(),
            queue_processed,
            queue_failed,
        })
    }

    /// Self-check for diagnostics. Never fails.
    #[must_use]
    pub fn validate_state(&self) -> ValidationReport {
        let Ok(state) = self.shared.state.lock() else {
            return ValidationReport::from_issues(vec![
                "internal state is corrupted (lock poisoned)".to_string(),
            ]);
        };

        let mut issues = Vec::new();

        if !state.renderer.has_element() {
            issues.push("no display surface bound".to_string());
        } else if !state.renderer.is_available() {
            issues.push("display surface is detached".to_string());
        }

        if state.history.len() > state.history.capacity() {
            issues.push(format!(
                "history holds {} entries, capacity is {}",
                state.history.len(),
                state.history.capacity()
            ));
        }

        if !self.shared.queue.is_healthy() {
            issues.push(format!(
                "queue is unreadable or over capacity ({})",
                self.shared.queue.capacity()
            ));
        }

        if !state.display.is_consistent() {
            issues.push("display state visibility does not match its content".to_string());
        }

        ValidationReport::from_issues(issues)
    }

    /// Cancels the timer, clears the queue, hides, and releases the surface.
    ///
    /// Calling it again does nothing. A destroyed manager cannot be reused.
    pub fn destroy(&self, clear_history: bool) {
        let Some(mut state) = self.shared.lock_state() else {
            return;
        };
        if state.destroyed {
            return;
        }

        state.renderer.clear_hide_timeout();
        let dropped = self.shared.queue.clear();
        if state.renderer.is_available() {
            state.renderer.hide();
        }
        state.display.clear();
        if clear_history {
            state.history.clear();
        }
        state.renderer.release_element();
        state.destroyed = true;

        self.shared.log(
            "status manager destroyed",
            format!("dropped_queue_items={dropped} cleared_history={clear_history}"),
        );
    }

    /// True once [`destroy`](Self::destroy) has run.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.shared.lock_state().is_some_and(|state| state.destroyed)
    }

    /// Whether a message is shown. `false` if state is unreadable.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.shared
            .lock_state()
            .is_some_and(|state| state.display.is_visible())
    }

    /// Snapshot of the display state.
    #[must_use]
    pub fn display_state(&self) -> Option<DisplayState> {
        self.shared.lock_state().map(|state| state.display.clone())
    }

    /// True while an auto-hide timer is armed.
    #[must_use]
    pub fn has_pending_hide(&self) -> bool {
        self.shared
            .lock_state()
            .is_some_and(|state| state.renderer.has_pending_hide())
    }

    /// True while a queue drain is running.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.shared.queue.is_processing()
    }

    /// Number of requests waiting in the queue.
    #[must_use]
    pub fn queue_len(&self) -> usize {
        self.shared.queue.len()
    }

    /// Settings the manager was built with.
    #[must_use]
    pub fn config(&self) -> &StatusConfig {
        &self.shared.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticEventKind, DiagnosticsCollector};
    use crate::status::surface::{DisplaySurface, MemorySurface, TAG_HIDDEN, TAG_VISIBLE};
    use std::time::Duration;

    fn config(enable_queue: bool) -> StatusConfig {
        StatusConfig {
            enable_queue,
            ..StatusConfig::default()
        }
    }

    fn manager_with(config: &StatusConfig) -> (StatusManager, Arc<Mutex<MemorySurface>>) {
        let surface = Arc::new(Mutex::new(MemorySurface::new()));
        let manager = StatusManager::new(config, Some(surface.clone()), None);
        (manager, surface)
    }

    fn ms(value: u64) -> Option<DisplayDuration> {
        Some(DisplayDuration::from_millis(value))
    }

    fn assert_consistent(manager: &StatusManager) {
        let state = manager.display_state().expect("state");
        assert!(state.is_consistent(), "inconsistent: {state:?}");
    }

    #[test]
    fn show_without_queue_renders_and_records() {
        let (manager, surface) = manager_with(&config(false));

        assert_eq!(manager.show_success("Saved", ms(0)), Ok(true));

        assert_eq!(surface.lock().unwrap().text(), "Saved");
        let history = manager.get_history(HistoryQuery::all());
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].severity, Severity::Success);
        assert_consistent(&manager);
    }

    #[test]
    fn empty_message_is_an_error_without_side_effects() {
        let (manager, surface) = manager_with(&config(true));

        assert_eq!(
            manager.show_status("", Severity::Info, None),
            Err(StatusError::EmptyMessage)
        );

        assert!(manager.get_history(HistoryQuery::all()).is_empty());
        assert_eq!(manager.display_state(), Some(DisplayState::default()));
        assert!(surface.lock().unwrap().has_tag(TAG_HIDDEN));
    }

    #[test]
    fn whitespace_message_is_shown_as_given() {
        let (manager, surface) = manager_with(&config(false));

        assert_eq!(manager.show_info("   ", ms(0)), Ok(true));

        assert_eq!(surface.lock().unwrap().text(), "   ");
        let history = manager.get_history(HistoryQuery::all());
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].message, "   ");
        assert_consistent(&manager);
    }

    #[test]
    fn detached_surface_fails_without_state_change() {
        let (manager, surface) = manager_with(&config(true));
        surface.lock().unwrap().detach();

        assert_eq!(manager.show_success("x", ms(0)), Ok(false));

        assert!(manager.get_history(HistoryQuery::all()).is_empty());
        assert!(!manager.is_visible());
        assert_consistent(&manager);
    }

    #[test]
    fn missing_surface_returns_false() {
        let manager = StatusManager::new(&StatusConfig::default(), None, None);
        assert_eq!(manager.show_info("hello", None), Ok(false));
        assert!(!manager.validate_state().is_valid);
    }

    #[tokio::test]
    async fn visible_requests_are_queued_until_full() {
        let cfg = StatusConfig {
            max_queue_size: 2,
            ..StatusConfig::default()
        };
        let (manager, surface) = manager_with(&cfg);

        assert_eq!(manager.show_info("first", ms(0)), Ok(true));
        assert_eq!(manager.show_info("second", ms(0)), Ok(true));
        assert_eq!(manager.show_info("third", ms(0)), Ok(true));
        assert_eq!(manager.show_info("fourth", ms(0)), Ok(false));

        assert_eq!(manager.queue_len(), 2);
        assert_eq!(surface.lock().unwrap().text(), "first");
    }

    #[test]
    fn visible_request_is_dropped_when_queue_disabled() {
        let (manager, surface) = manager_with(&config(false));

        assert_eq!(manager.show_info("first", ms(0)), Ok(true));
        assert_eq!(manager.show_info("second", ms(0)), Ok(false));

        assert_eq!(surface.lock().unwrap().text(), "first");
        assert_eq!(manager.get_history(HistoryQuery::all()).len(), 1);
    }

    #[tokio::test]
    async fn queued_items_render_in_order_after_drain() {
        let (manager, surface) = manager_with(&config(true));

        manager.show_info("a", ms(0)).expect("show");
        manager.show_info("b", ms(0)).expect("show");
        manager.show_info("c", ms(0)).expect("show");

        let summary = manager.process_queue().await;
        // A spawned drain may already have taken the items.
        tokio::task::yield_now().await;

        let messages: Vec<_> = manager
            .get_history(HistoryQuery::all())
            .into_iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(messages, vec!["a", "b", "c"]);
        assert!(summary.processed <= 2);
        assert_eq!(surface.lock().unwrap().text(), "c");
        assert_eq!(manager.queue_len(), 0);
    }

    #[test]
    fn hide_is_idempotent() {
        let (manager, surface) = manager_with(&config(true));
        manager.show_warning("careful", ms(0)).expect("show");

        assert!(manager.hide_status());
        assert!(manager.hide_status());

        let surface = surface.lock().unwrap();
        assert!(surface.text().is_empty());
        assert!(!surface.has_tag(TAG_VISIBLE));
        drop(surface);
        assert_eq!(manager.display_state(), Some(DisplayState::default()));
    }

    #[test]
    fn failed_hide_keeps_display_state() {
        let (manager, surface) = manager_with(&config(true));
        manager.show_error("boom", ms(0)).expect("show");
        surface.lock().unwrap().detach();

        assert!(!manager.hide_status());

        let state = manager.display_state().expect("state");
        assert!(state.is_visible());
        assert_eq!(state.current_message(), Some("boom"));
        assert_eq!(state.current_severity(), Some(Severity::Error));
    }

    #[tokio::test]
    async fn history_round_trip_returns_latest_entry() {
        let (manager, _surface) = manager_with(&config(true));
        manager.show_success("Saved", ms(1200)).expect("show");

        let latest = manager.get_history(HistoryQuery::all().with_limit(1));
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].message, "Saved");
        assert_eq!(latest[0].duration_ms, 1200);
    }

    #[tokio::test(start_paused = true)]
    async fn long_duration_is_recorded_and_honored_exactly() {
        let (manager, _surface) = manager_with(&config(true));
        manager.show_info("Importing", ms(120_000)).expect("show");

        let latest = manager.get_history(HistoryQuery::all().with_limit(1));
        assert_eq!(latest[0].duration_ms, 120_000);

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert!(manager.is_visible());

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(!manager.is_visible());
    }

    #[test]
    fn timed_message_without_runtime_stays_until_hidden() {
        let mut collector = DiagnosticsCollector::default();
        let surface = Arc::new(Mutex::new(MemorySurface::new()));
        let manager =
            StatusManager::new(&config(true), Some(surface.clone()), Some(collector.handle()));

        assert_eq!(manager.show_success("Saved", ms(1200)), Ok(true));

        assert!(manager.is_visible());
        assert!(!manager.has_pending_hide());
        let latest = manager.get_history(HistoryQuery::all().with_limit(1));
        assert_eq!(latest[0].duration_ms, 1200);
        collector.process_pending();
        assert!(collector.iter().any(|e| matches!(&e.kind,
            DiagnosticEventKind::Warning { event } if event.warning_type == WarningType::AutoHideUnavailable)));

        assert!(manager.hide_status());
        assert!(!manager.is_visible());
    }

    #[test]
    fn timed_message_off_runtime_uses_construction_runtime() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .expect("runtime");
        let (manager, surface) = runtime.block_on(async { manager_with(&config(true)) });

        assert_eq!(manager.show_success("Saved", ms(20)), Ok(true));
        assert!(manager.has_pending_hide());

        runtime.block_on(async { tokio::time::sleep(Duration::from_millis(200)).await });
        assert!(!manager.is_visible());
        assert!(surface.lock().unwrap().text().is_empty());
    }

    #[test]
    fn named_severity_falls_back_to_info() {
        let mut collector = DiagnosticsCollector::default();
        let surface = Arc::new(Mutex::new(MemorySurface::new()));
        let manager =
            StatusManager::new(&config(true), Some(surface.clone()), Some(collector.handle()));

        assert_eq!(manager.show_status_named("hello", "fatal", ms(0)), Ok(true));

        assert!(surface.lock().unwrap().has_tag("status-info"));
        collector.process_pending();
        assert!(collector.iter().any(|e| matches!(&e.kind,
            DiagnosticEventKind::Warning { event } if event.warning_type == WarningType::SeverityNormalized)));
    }

    #[tokio::test(start_paused = true)]
    async fn auto_hide_fires_after_duration() {
        let (manager, surface) = manager_with(&config(true));
        manager.show_success("Saved", ms(3000)).expect("show");
        assert!(manager.has_pending_hide());

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(manager.is_visible());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!manager.is_visible());
        assert!(surface.lock().unwrap().text().is_empty());
        assert_consistent(&manager);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_duration_stays_visible() {
        let (manager, _surface) = manager_with(&config(true));
        manager.show_info("sticky", ms(0)).expect("show");
        assert!(!manager.has_pending_hide());

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert!(manager.is_visible());
    }

    #[test]
    fn statistics_reflect_history_and_display() {
        let (manager, _surface) = manager_with(&config(false));
        manager.show_success("a", ms(0)).expect("show");
        manager.hide_status();
        manager.show_error("b", ms(0)).expect("show");

        let stats = manager.get_statistics().expect("statistics");
        assert_eq!(stats.total_displayed, 2);
        assert_eq!(stats.by_severity.success, 1);
        assert_eq!(stats.by_severity.error, 1);
        assert!(stats.is_visible);
        assert_eq!(stats.current_severity, Some(Severity::Error));
        assert!(stats.last_displayed_at.is_some());
        assert!(!stats.is_processing);
    }

    #[test]
    fn validate_state_passes_for_healthy_manager() {
        let (manager, _surface) = manager_with(&config(true));
        manager.show_info("ok", ms(0)).expect("show");

        let report = manager.validate_state();
        assert!(report.is_valid, "issues: {:?}", report.issues);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn validate_state_reports_detached_surface() {
        let (manager, surface) = manager_with(&config(true));
        surface.lock().unwrap().detach();

        let report = manager.validate_state();
        assert!(!report.is_valid);
        assert_eq!(report.issues, vec!["display surface is detached".to_string()]);
    }

    #[test]
    fn validate_state_accepts_long_default_duration() {
        let cfg = StatusConfig {
            default_duration_ms: 600_000,
            max_history_size: 5_000,
            max_queue_size: 500,
            ..StatusConfig::default()
        };
        let (manager, _surface) = manager_with(&cfg);

        let report = manager.validate_state();
        assert!(report.is_valid, "issues: {:?}", report.issues);
    }

    #[test]
    fn poisoned_state_is_reported_not_propagated() {
        let (manager, _surface) = manager_with(&config(true));
        let poisoner = manager.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.shared.state.lock().unwrap();
            panic!("poison the status lock");
        })
        .join();

        assert_eq!(manager.get_statistics(), None);
        assert_eq!(manager.show_info("x", None), Ok(false));
        assert!(manager.get_history(HistoryQuery::all()).is_empty());
        let report = manager.validate_state();
        assert!(!report.is_valid);
        assert_eq!(report.issues.len(), 1);
    }

    #[tokio::test]
    async fn destroy_hides_clears_and_is_idempotent() {
        let (manager, surface) = manager_with(&config(true));
        manager.show_info("a", ms(0)).expect("show");
        manager.show_info("b", ms(0)).expect("show");

        manager.destroy(true);
        manager.destroy(true);

        assert!(manager.is_destroyed());
        assert_eq!(manager.queue_len(), 0);
        assert!(manager.get_history(HistoryQuery::all()).is_empty());
        assert!(surface.lock().unwrap().text().is_empty());
        assert_eq!(manager.show_info("again", None), Ok(false));
        assert!(!manager.set_surface(surface.clone()));
    }

    #[test]
    fn destroy_can_keep_history() {
        let (manager, _surface) = manager_with(&config(false));
        manager.show_info("kept", ms(0)).expect("show");

        manager.destroy(false);

        assert_eq!(manager.get_history(HistoryQuery::all()).len(), 1);
        assert!(!manager.is_visible());
    }

    #[tokio::test]
    async fn drain_after_destroy_halts() {
        let (manager, _surface) = manager_with(&config(true));
        manager.destroy(false);
        manager
            .shared
            .queue
            .enqueue("late", Severity::Info, DisplayDuration::INDEFINITE);

        let summary = manager.process_queue().await;
        assert!(summary.halted);
        assert_eq!(summary.processed, 0);
    }

    #[test]
    fn set_surface_rebinds() {
        let manager = StatusManager::new(&StatusConfig::default(), None, None);
        let surface = Arc::new(Mutex::new(MemorySurface::new()));

        assert!(manager.set_surface(surface.clone()));
        assert_eq!(manager.show_info("bound", ms(0)), Ok(true));
        assert_eq!(surface.lock().unwrap().text(), "bound");
    }
}
