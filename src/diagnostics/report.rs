// SPDX-License-Identifier: MPL-2.0
//! Diagnostic report generation and JSON export.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DiagnosticEventKind;
use crate::status::{StatusStatistics, ValidationReport};

// =============================================================================
// Report Metadata
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportMetadata {
    /// Unique identifier for this report (UUID v4)
    pub report_id: String,
    /// When the report was generated (ISO 8601)
    pub generated_at: String,
    pub crate_version: String,
    /// When diagnostic collection started (ISO 8601)
    pub collection_started_at: String,
    pub collection_duration_ms: u64,
    pub event_count: usize,
}

impl ReportMetadata {
    #[must_use]
    pub fn new(
        collection_started_at: DateTime<Utc>,
        collection_duration_ms: u64,
        event_count: usize,
    ) -> Self {
        Self {
            report_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now().to_rfc3339(),
            crate_version: env!("CARGO_PKG_VERSION").to_string(),
            collection_started_at: collection_started_at.to_rfc3339(),
            collection_duration_ms,
            event_count,
        }
    }
}

// =============================================================================
// Serializable Event
// =============================================================================

/// A diagnostic event with its `Instant` turned into an offset from the
/// start of collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SerializableEvent {
    /// Milliseconds since collection started
    pub timestamp_ms: u64,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl SerializableEvent {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Duration in ms fits comfortably in u64
    pub fn new(
        event_timestamp: Instant,
        collection_start: Instant,
        kind: DiagnosticEventKind,
    ) -> Self {
        let timestamp_ms = event_timestamp
            .saturating_duration_since(collection_start)
            .as_millis() as u64;

        Self { timestamp_ms, kind }
    }
}

// =============================================================================
// Report Summary
// =============================================================================

/// Event counts per kind.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportSummary {
    pub logs: usize,
    pub warnings: usize,
    pub errors: usize,
}

impl ReportSummary {
    #[must_use]
    pub fn from_events(events: &[SerializableEvent]) -> Self {
        events
            .iter()
            .fold(Self::default(), |mut summary, event| {
                match event.kind {
                    DiagnosticEventKind::Log { .. } => summary.logs += 1,
                    DiagnosticEventKind::Warning { .. } => summary.warnings += 1,
                    DiagnosticEventKind::Error { .. } => summary.errors += 1,
                }
                summary
            })
    }
}

// =============================================================================
// Status Section
// =============================================================================

/// Snapshot of the status subsystem taken when the report is built.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatusSection {
    /// `None` when the status manager's state could not be read.
    pub statistics: Option<StatusStatistics>,
    pub validation: ValidationReport,
}

// =============================================================================
// Diagnostic Report
// =============================================================================

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DiagnosticReport {
    pub metadata: ReportMetadata,
    pub summary: ReportSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusSection>,
    pub events: Vec<SerializableEvent>,
}

impl DiagnosticReport {
    #[must_use]
    pub fn new(
        metadata: ReportMetadata,
        status: Option<StatusSection>,
        events: Vec<SerializableEvent>,
    ) -> Self {
        Self {
            summary: ReportSummary::from_events(&events),
            metadata,
            status,
            events,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{ErrorEvent, ErrorType, WarningEvent, WarningType};
    use std::time::Duration;

    fn log(message: &str) -> DiagnosticEventKind {
        DiagnosticEventKind::Log {
            message: message.to_string(),
            details: None,
        }
    }

    #[test]
    fn serializable_event_uses_relative_millis() {
        let start = Instant::now();
        let event = SerializableEvent::new(start + Duration::from_millis(250), start, log("x"));
        assert_eq!(event.timestamp_ms, 250);
    }

    #[test]
    fn serializable_event_before_start_saturates_to_zero() {
        let start = Instant::now() + Duration::from_secs(1);
        let event = SerializableEvent::new(Instant::now(), start, log("x"));
        assert_eq!(event.timestamp_ms, 0);
    }

    #[test]
    fn summary_counts_each_kind() {
        let start = Instant::now();
        let events = vec![
            SerializableEvent::new(start, start, log("a")),
            SerializableEvent::new(start, start, log("b")),
            SerializableEvent::new(
                start,
                start,
                DiagnosticEventKind::Warning {
                    event: WarningEvent::new(WarningType::Other, "w"),
                },
            ),
            SerializableEvent::new(
                start,
                start,
                DiagnosticEventKind::Error {
                    event: ErrorEvent::new(ErrorType::Other, "e"),
                },
            ),
        ];

        let summary = ReportSummary::from_events(&events);
        assert_eq!(
            summary,
            ReportSummary {
                logs: 2,
                warnings: 1,
                errors: 1
            }
        );
    }

    #[test]
    fn metadata_has_uuid_and_version() {
        let metadata = ReportMetadata::new(Utc::now(), 10, 0);
        assert!(Uuid::parse_str(&metadata.report_id).is_ok());
        assert_eq!(metadata.crate_version, env!("CARGO_PKG_VERSION"));
    }
}
