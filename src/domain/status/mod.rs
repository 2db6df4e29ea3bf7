// SPDX-License-Identifier: MPL-2.0
//! Status domain types.
//!
//! - [`HistoryCapacity`]: retained history entries
//! - [`QueueCapacity`]: pending queue slots
//! - [`DisplayDuration`]: auto-hide delay for a status message

mod newtypes;

pub use newtypes::{
    duration_bounds, history_bounds, queue_bounds, DisplayDuration, HistoryCapacity,
    QueueCapacity,
};
