// SPDX-License-Identifier: MPL-2.0
//! Display surface abstraction.
//!
//! A surface is the single UI element a status message is rendered into.
//! The status core only needs its text, a set of visual tags, and whether
//! it is still attached to the live UI tree.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

/// Tag present on every status surface.
pub const TAG_BASE: &str = "status";

/// Tag applied while a message is shown.
pub const TAG_VISIBLE: &str = "visible";

/// Tag applied once the message is cleared.
pub const TAG_HIDDEN: &str = "hidden";

/// The element a status message is rendered into.
pub trait DisplaySurface: Send {
    /// Whether the surface is still part of the live UI tree.
    fn is_attached(&self) -> bool;

    fn text(&self) -> String;

    fn set_text(&mut self, text: &str);

    fn has_tag(&self, tag: &str) -> bool;

    /// Replaces every tag on the surface with `tags`.
    fn set_tags(&mut self, tags: &[&str]);
}

/// Shared handle to a bound display surface.
pub type SurfaceHandle = Arc<Mutex<dyn DisplaySurface>>;

/// Wraps a surface into a [`SurfaceHandle`].
pub fn surface_handle<S: DisplaySurface + 'static>(surface: S) -> SurfaceHandle {
    Arc::new(Mutex::new(surface))
}

/// In-memory surface, used headless and in tests.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    text: String,
    tags: BTreeSet<String>,
    attached: bool,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self {
            text: String::new(),
            tags: BTreeSet::from([TAG_BASE.to_string(), TAG_HIDDEN.to_string()]),
            attached: true,
        }
    }
}

impl MemorySurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates removal from the UI tree.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Current tags in sorted order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }
}

impl DisplaySurface for MemorySurface {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    fn set_tags(&mut self, tags: &[&str]) {
        self.tags = tags.iter().map(|tag| (*tag).to_string()).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_is_attached_and_hidden() {
        let surface = MemorySurface::new();
        assert!(surface.is_attached());
        assert!(surface.has_tag(TAG_HIDDEN));
        assert!(surface.text().is_empty());
    }

    #[test]
    fn set_tags_replaces_previous_tags() {
        let mut surface = MemorySurface::new();
        surface.set_tags(&[TAG_BASE, "status-info", TAG_VISIBLE]);
        assert!(!surface.has_tag(TAG_HIDDEN));
        assert_eq!(
            surface.tags().collect::<Vec<_>>(),
            vec!["status", "status-info", "visible"]
        );
    }

    #[test]
    fn detach_and_attach_toggle_attachment() {
        let mut surface = MemorySurface::new();
        surface.detach();
        assert!(!surface.is_attached());
        surface.attach();
        assert!(surface.is_attached());
    }

    #[test]
    fn typed_handle_coerces_to_surface_handle() {
        let typed = Arc::new(Mutex::new(MemorySurface::new()));
        let handle: SurfaceHandle = typed.clone();
        handle.lock().unwrap().set_text("hello");
        assert_eq!(typed.lock().unwrap().text(), "hello");
    }
}
