// SPDX-License-Identifier: MPL-2.0
//! Status message subsystem.
//!
//! Shows short feedback messages ("Saved", "Invalid URL") on a single
//! display surface of the options page.
//!
//! # Components
//!
//! - [`Renderer`]: writes a message onto the [`DisplaySurface`], verifies it,
//!   and owns the auto-hide timer
//! - [`StatusHistory`]: bounded ledger of past displays
//! - [`StatusQueue`]: bounded FIFO for requests that arrive while a message is
//!   visible, drained one item at a time
//! - [`StatusManager`]: the entry point that composes the three
//!
//! # Example
//!
//! ```
//! use options_status::config::StatusConfig;
//! use options_status::status::{surface_handle, MemorySurface, StatusManager};
//!
//! let manager = StatusManager::new(
//!     &StatusConfig::default(),
//!     Some(surface_handle(MemorySurface::new())),
//!     None,
//! );
//! assert_eq!(manager.show_info("Settings saved", None), Ok(true));
//! assert!(manager.is_visible());
//! ```

mod history;
mod manager;
mod queue;
mod renderer;
mod severity;
mod surface;

pub use history::{HistoryEntry, HistoryQuery, SeverityCounts, StatusHistory};
pub use manager::{DisplayState, StatusManager, StatusStatistics, ValidationReport};
pub use queue::{DrainSummary, QueueItem, StatusQueue};
pub use renderer::Renderer;
pub use severity::Severity;
pub use surface::{
    surface_handle, DisplaySurface, MemorySurface, SurfaceHandle, TAG_BASE, TAG_HIDDEN,
    TAG_VISIBLE,
};
