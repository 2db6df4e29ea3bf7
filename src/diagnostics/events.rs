// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types.
//!
//! Events are what the status subsystem's `log` / `log_error` callbacks
//! produce. Warnings and errors carry a typed category so reports can be
//! grouped without parsing messages.

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Category of a non-fatal condition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WarningType {
    /// A surface was bound but is not attached to the live UI tree.
    SurfaceDetached,
    /// The queue refused a request (disabled or full).
    QueueRejected,
    /// An unrecognized severity name was replaced by `info`.
    SeverityNormalized,
    /// The settings file could not be read and defaults were used.
    ConfigFallback,
    /// A timed message stays visible because no auto-hide could be armed.
    AutoHideUnavailable,
    Other,
}

/// Category of a failed operation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// No surface bound, or the bound surface is detached.
    SurfaceUnavailable,
    /// A surface mutation did not read back as written.
    VerificationFailed,
    /// An internal lock was poisoned by a panic.
    StateCorrupted,
    /// A queue handler failed and stopped the drain.
    QueueHandlerFailed,
    /// A timer could not be armed because no async runtime is running.
    TimerUnavailable,
    Other,
}

/// A warning with its category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WarningEvent {
    pub warning_type: WarningType,
    pub message: String,
}

impl WarningEvent {
    #[must_use]
    pub fn new(warning_type: WarningType, message: impl Into<String>) -> Self {
        Self {
            warning_type,
            message: message.into(),
        }
    }
}

/// An error with its category and optional underlying cause.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorEvent {
    pub error_type: ErrorType,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl ErrorEvent {
    #[must_use]
    pub fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
            cause: None,
        }
    }

    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }
}

/// A single diagnostic event.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event occurred (monotonic clock for duration calculations)
    pub timestamp: Instant,
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event with the current timestamp.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Instant::now(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    /// Informational trace from a component.
    Log {
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },

    Warning { event: WarningEvent },

    Error { event: ErrorEvent },
}

impl DiagnosticEventKind {
    /// Returns true for `Error` events.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}
