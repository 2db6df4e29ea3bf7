// SPDX-License-Identifier: MPL-2.0
//! Status subsystem newtypes.
//!
//! Type-safe wrappers for the status manager's limits. Capacities have a
//! floor of one entry and no ceiling; durations are kept exactly as given.

use std::time::Duration;

// =============================================================================
// History Capacity
// =============================================================================

/// History capacity bounds (at least 1 entry).
pub mod history_bounds {
    /// Minimum number of retained history entries.
    pub const MIN: usize = 1;
    /// Default number of retained history entries.
    pub const DEFAULT: usize = 50;
}

/// Maximum number of entries kept by the status history ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryCapacity(usize);

impl HistoryCapacity {
    /// Creates a new history capacity. Zero is raised to the minimum.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.max(history_bounds::MIN))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for HistoryCapacity {
    fn default() -> Self {
        Self(history_bounds::DEFAULT)
    }
}

// =============================================================================
// Queue Capacity
// =============================================================================

/// Queue capacity bounds (at least 1 pending request).
pub mod queue_bounds {
    /// Minimum number of pending requests.
    pub const MIN: usize = 1;
    /// Default number of pending requests.
    pub const DEFAULT: usize = 10;
}

/// Maximum number of pending requests the status queue accepts.
///
/// The queue rejects rather than evicts once this many items are pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueCapacity(usize);

impl QueueCapacity {
    /// Creates a new queue capacity. Zero is raised to the minimum.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.max(queue_bounds::MIN))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for QueueCapacity {
    fn default() -> Self {
        Self(queue_bounds::DEFAULT)
    }
}

// =============================================================================
// Display Duration
// =============================================================================

/// Display duration defaults in milliseconds.
///
/// Zero means "keep the message until it is explicitly hidden".
pub mod duration_bounds {
    /// Default display duration in milliseconds.
    pub const DEFAULT_MS: u64 = 3_000;
}

/// How long a status message stays on screen before auto-hiding.
///
/// Any millisecond count is accepted and kept as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DisplayDuration(u64);

impl DisplayDuration {
    /// A duration that never auto-hides.
    pub const INDEFINITE: Self = Self(0);

    /// Creates a display duration from milliseconds.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Creates a display duration from a `Duration`, saturating at `u64::MAX`
    /// milliseconds.
    #[must_use]
    pub fn from_duration(duration: Duration) -> Self {
        Self::from_millis(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the value as a `Duration`.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// Returns true if the message should stay until hidden.
    #[must_use]
    pub fn is_indefinite(self) -> bool {
        self.0 == 0
    }
}

impl Default for DisplayDuration {
    fn default() -> Self {
        Self(duration_bounds::DEFAULT_MS)
    }
}

impl From<DisplayDuration> for Duration {
    fn from(value: DisplayDuration) -> Self {
        value.as_duration()
    }
}

// =============================================================================
// Tests
// =============================================================================
