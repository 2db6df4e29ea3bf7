// SPDX-License-Identifier: MPL-2.0
//! Bounded ledger of past status displays.

use std::collections::VecDeque;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::severity::Severity;
use crate::domain::status::{DisplayDuration, HistoryCapacity};

/// One recorded display. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub severity: Severity,
    pub message: String,
    /// RFC 3339 UTC with millisecond precision, e.g. `2026-01-02T03:04:05.678Z`.
    pub timestamp: String,
    pub duration_ms: u64,
}

impl HistoryEntry {
    fn now(severity: Severity, message: &str, duration: DisplayDuration) -> Self {
        Self {
            severity,
            message: message.to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            duration_ms: duration.as_millis(),
        }
    }
}

/// Filter for [`StatusHistory::get`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryQuery {
    pub severity: Option<Severity>,
    /// Keep only the most recent `limit` entries. Zero is ignored.
    pub limit: Option<usize>,
}

impl HistoryQuery {
    /// Matches every entry.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Keeps only entries of `severity`.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Keeps the `limit` most recent matches; zero means no limit.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Filters by a textual severity. Unknown names leave the filter unset.
    #[must_use]
    pub fn severity_named(mut self, name: &str) -> Self {
        self.severity = Severity::from_name(name);
        self
    }
}

/// Number of recorded entries per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub success: usize,
    pub error: usize,
    pub warning: usize,
    pub info: usize,
}

impl SeverityCounts {
    /// Count for one severity.
    #[must_use]
    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Success => self.success,
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }

    fn bump(&mut self, severity: Severity) {
        match severity {
            Severity::Success => self.success += 1,
            Severity::Error => self.error += 1,
            Severity::Warning => self.warning += 1,
            Severity::Info => self.info += 1,
        }
    }
}

/// Append-only ledger that evicts its oldest entries past capacity.
///
/// A disabled ledger accepts every call and records nothing.
#[derive(Debug, Clone)]
pub struct StatusHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: HistoryCapacity,
    enabled: bool,
}

impl StatusHistory {
    /// Creates an empty ledger. A disabled one never records.
    #[must_use]
    pub fn new(enabled: bool, capacity: HistoryCapacity) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
            enabled,
        }
    }

    /// Records a display, evicting the oldest entry when full.
    pub fn add(&mut self, severity: Severity, message: &str, duration: DisplayDuration) {
        if !self.enabled {
            return;
        }
        self.entries
            .push_back(HistoryEntry::now(severity, message, duration));
        while self.entries.len() > self.capacity.value() {
            self.entries.pop_front();
        }
    }

    /// Entries in insertion order (most recent last).
    #[must_use]
    pub fn get(&self, query: HistoryQuery) -> Vec<HistoryEntry> {
        let mut matching: Vec<HistoryEntry> = self
            .entries
            .iter()
            .filter(|entry| query.severity.is_none_or(|s| entry.severity == s))
            .cloned()
            .collect();

        if let Some(limit) = query.limit.filter(|limit| *limit > 0) {
            let skip = matching.len().saturating_sub(limit);
            matching.drain(..skip);
        }
        matching
    }

    /// The most recent entry, if any.
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// Removes every entry and returns how many there were.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        removed
    }

    /// Number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entry is retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether displays are being recorded.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Most entries retained before eviction.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity.value()
    }

    /// Retained entries per severity.
    #[must_use]
    pub fn counts(&self) -> SeverityCounts {
        self.entries
            .iter()
            .fold(SeverityCounts::default(), |mut counts, entry| {
                counts.bump(entry.severity);
                counts
            })
    }
}

impl Default for StatusHistory {
    fn default() -> Self {
        Self::new(true, HistoryCapacity::default())
    }
}
