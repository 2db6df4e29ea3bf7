// SPDX-License-Identifier: MPL-2.0
//! Renders status messages onto the bound display surface.
//!
//! The renderer exclusively owns the surface handle and the single pending
//! auto-hide timer. Every mutation is read back from the surface; a
//! mismatch is reported as a failed display rather than trusted.

use std::sync::MutexGuard;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::severity::Severity;
use super::surface::{DisplaySurface, SurfaceHandle, TAG_BASE, TAG_HIDDEN, TAG_VISIBLE};
use crate::diagnostics::{
    DiagnosticsHandle, ErrorEvent, ErrorType, WarningEvent, WarningType,
};

/// Writes status text and tags to one display surface.
#[derive(Default)]
pub struct Renderer {
    surface: Option<SurfaceHandle>,
    /// At most one armed auto-hide timer.
    hide_timer: Option<JoinHandle<()>>,
    /// Used for timers when the caller is not on a runtime thread.
    runtime: Option<Handle>,
    diagnostics: Option<DiagnosticsHandle>,
}

impl Renderer {
    /// Creates a renderer, optionally bound to `surface`.
    #[must_use]
    pub fn new(surface: Option<SurfaceHandle>) -> Self {
        Self {
            surface,
            hide_timer: None,
            runtime: None,
            diagnostics: None,
        }
    }

    /// Sets the runtime that hosts auto-hide timers armed off-runtime.
    pub fn set_runtime(&mut self, runtime: Handle) {
        self.runtime = Some(runtime);
    }

    /// Routes warnings and errors to `handle`.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    /// Binds a new surface, replacing the previous one.
    ///
    /// A detached surface is still bound; the problem is logged and every
    /// display fails until it is attached.
    pub fn set_element(&mut self, surface: SurfaceHandle) {
        self.surface = Some(surface);
        if !self.is_available() {
            self.warn(
                WarningType::SurfaceDetached,
                "bound display surface is not attached to the UI tree",
            );
        }
    }

    /// Unbinds and returns the surface.
    pub fn release_element(&mut self) -> Option<SurfaceHandle> {
        self.surface.take()
    }

    /// True if a surface is bound, attached or not.
    #[must_use]
    pub fn has_element(&self) -> bool {
        self.surface.is_some()
    }

    /// True if a surface is bound and attached to the live UI tree.
    #[must_use]
    pub fn is_available(&self) -> bool {
        let Some(surface) = &self.surface else {
            return false;
        };
        match surface.lock() {
            Ok(guard) => guard.is_attached(),
            Err(_) => false,
        }
    }

    /// Shows `message` with the tags for `severity`.
    ///
    /// Cancels any pending auto-hide first. Returns `false` without touching
    /// anything if the surface is missing or detached, and `false` if the
    /// surface does not read back what was written.
    pub fn display(&mut self, message: &str, severity: Severity) -> bool {
        let Some(surface) = self.surface.clone() else {
            self.error(ErrorType::SurfaceUnavailable, "no display surface bound", None);
            return false;
        };
        let Some(mut guard) = self.lock_attached(&surface) else {
            return false;
        };

        self.clear_hide_timeout();

        guard.set_text(message);
        guard.set_tags(&[TAG_BASE, severity.tag(), TAG_VISIBLE]);

        let verified =
            guard.text() == message && guard.has_tag(TAG_VISIBLE) && guard.has_tag(severity.tag());
        drop(guard);

        if !verified {
            self.error(
                ErrorType::VerificationFailed,
                "display surface did not keep the written status",
                Some(format!("severity={severity}")),
            );
        }
        verified
    }

    /// Clears the text and marks the surface hidden.
    pub fn hide(&mut self) -> bool {
        let Some(surface) = self.surface.clone() else {
            self.error(ErrorType::SurfaceUnavailable, "no display surface bound", None);
            return false;
        };
        let Some(mut guard) = self.lock_attached(&surface) else {
            return false;
        };

        guard.set_text("");
        guard.set_tags(&[TAG_BASE, TAG_HIDDEN]);

        let verified =
            guard.text().is_empty() && guard.has_tag(TAG_HIDDEN) && !guard.has_tag(TAG_VISIBLE);
        drop(guard);

        if !verified {
            self.error(
                ErrorType::VerificationFailed,
                "display surface did not clear",
                None,
            );
        }
        verified
    }

    /// Arms the one-shot auto-hide timer, cancelling any armed one first.
    ///
    /// Uses the current tokio runtime, else the one given to
    /// [`set_runtime`](Self::set_runtime). Returns `false` (and logs) when
    /// neither exists.
    pub fn schedule_hide<F>(&mut self, after: Duration, callback: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(err) => match self.runtime.clone() {
                Some(runtime) => runtime,
                None => {
                    self.error(
                        ErrorType::TimerUnavailable,
                        "cannot arm auto-hide timer",
                        Some(err.to_string()),
                    );
                    return false;
                }
            },
        };

        self.clear_hide_timeout();
        self.hide_timer = Some(runtime.spawn(async move {
            tokio::time::sleep(after).await;
            callback();
        }));
        true
    }

    /// Cancels the armed auto-hide timer, if any.
    pub fn clear_hide_timeout(&mut self) {
        if let Some(timer) = self.hide_timer.take() {
            timer.abort();
        }
    }

    /// True while an armed timer has not fired or been cancelled.
    #[must_use]
    pub fn has_pending_hide(&self) -> bool {
        self.hide_timer
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }

    fn lock_attached<'a>(
        &self,
        surface: &'a SurfaceHandle,
    ) -> Option<MutexGuard<'a, dyn DisplaySurface + 'static>> {
        let guard = match surface.lock() {
            Ok(guard) => guard,
            Err(_) => {
                self.error(ErrorType::StateCorrupted, "display surface lock poisoned", None);
                return None;
            }
        };
        if !guard.is_attached() {
            self.error(
                ErrorType::SurfaceUnavailable,
                "display surface is detached from the UI tree",
                None,
            );
            return None;
        }
        Some(guard)
    }

    fn warn(&self, warning_type: WarningType, message: &str) {
        if let Some(handle) = &self.diagnostics {
            handle.log_warning(WarningEvent::new(warning_type, message));
        }
    }

    fn error(&self, error_type: ErrorType, message: &str, cause: Option<String>) {
        if let Some(handle) = &self.diagnostics {
            let mut event = ErrorEvent::new(error_type, message);
            event.cause = cause;
            handle.log_error(event);
        }
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        self.clear_hide_timeout();
    }
}
