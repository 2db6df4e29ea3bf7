// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for the options page.
//!
//! Components receive a [`DiagnosticsHandle`] as their `log` / `log_error`
//! sink. Events are stored in a memory-bounded circular buffer and can be
//! exported as a JSON report that also embeds the status subsystem's
//! statistics and self-validation.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: A log line, warning or error with its timestamp
//! - [`DiagnosticsCollector`]: Owns the buffer, builds and exports reports

mod buffer;
mod collector;
mod events;
mod export;
mod report;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{
    DiagnosticEvent, DiagnosticEventKind, ErrorEvent, ErrorType, WarningEvent, WarningType,
};
pub use export::{generate_default_filename, ExportError};
pub use report::{
    DiagnosticReport, ReportMetadata, ReportSummary, SerializableEvent, StatusSection,
};
