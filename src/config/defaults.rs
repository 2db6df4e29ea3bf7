// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Status**: display duration, history and queue sizes
//! - **Diagnostics**: event buffer capacity

// ==========================================================================
// Status Defaults
// ==========================================================================

/// Default auto-hide delay for status messages (in milliseconds).
pub const DEFAULT_STATUS_DURATION_MS: u64 = 3_000;

/// Default number of status displays kept in history.
pub const DEFAULT_MAX_HISTORY_SIZE: usize = 50;

/// Minimum history size.
pub const MIN_MAX_HISTORY_SIZE: usize = 1;

/// Default number of pending status requests the queue accepts.
pub const DEFAULT_MAX_QUEUE_SIZE: usize = 10;

/// Minimum queue size.
pub const MIN_MAX_QUEUE_SIZE: usize = 1;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default capacity of the diagnostics event buffer.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 500;

/// Minimum diagnostics buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 50;

/// Maximum diagnostics buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 5000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_STATUS_DURATION_MS > 0);

    assert!(MIN_MAX_HISTORY_SIZE > 0);
    assert!(DEFAULT_MAX_HISTORY_SIZE >= MIN_MAX_HISTORY_SIZE);

    assert!(MIN_MAX_QUEUE_SIZE > 0);
    assert!(DEFAULT_MAX_QUEUE_SIZE >= MIN_MAX_QUEUE_SIZE);

    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(MAX_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
};
