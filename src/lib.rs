// SPDX-License-Identifier: MPL-2.0
//! `options_status` is the status-message engine of a browser-extension
//! options page.
//!
//! It renders short feedback messages onto a display surface, keeps a
//! bounded history of them, queues messages that arrive while another is
//! visible, and reports on its own health. Around that core it carries the
//! options page's settings file, theme and locale resolution, and a
//! diagnostics collector.

#![doc(html_root_url = "https://docs.rs/options_status/0.3.0")]

pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod paths;
pub mod status;
pub mod theme;
