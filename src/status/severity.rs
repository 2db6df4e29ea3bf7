// SPDX-License-Identifier: MPL-2.0
//! Status severity levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity determines the visual tag applied to a status display.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Operation completed successfully.
    Success,
    /// Operation failed.
    Error,
    /// Something needs attention but nothing failed.
    Warning,
    /// Neutral information.
    #[default]
    Info,
}

impl Severity {
    /// Every severity, in declaration order.
    pub const ALL: [Severity; 4] = [
        Severity::Success,
        Severity::Error,
        Severity::Warning,
        Severity::Info,
    ];

    /// Lowercase name (`"success"`, `"error"`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }

    /// Visual tag applied to the display surface for this severity.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Severity::Success => "status-success",
            Severity::Error => "status-error",
            Severity::Warning => "status-warning",
            Severity::Info => "status-info",
        }
    }

    /// Parses a severity name, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for unrecognized names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
