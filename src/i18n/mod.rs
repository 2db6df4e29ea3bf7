// SPDX-License-Identifier: MPL-2.0
//! Locale selection for the options page.
//!
//! - Locale resolution from CLI, config, or system settings
//! - Runtime language switching restricted to supported locales
//! - Fallback to the default locale when nothing matches

pub mod locale;
