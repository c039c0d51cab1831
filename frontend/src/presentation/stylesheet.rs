//! Stylesheet injection tied to component lifetime.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use super::about::{ABOUT_BANNER_CSS, ABOUT_SECTION_CSS};

/// Head id of the About section stylesheet.
pub const ABOUT_SECTION_STYLESHEET_ID: &str = "about-section";
/// Head id of the About banner stylesheet.
pub const ABOUT_BANNER_STYLESHEET_ID: &str = "about-banner";

/// Port over the document head.
pub trait StyleHost: Send + Sync {
    /// Insert or replace the stylesheet registered under `id`.
    fn insert_stylesheet(&self, id: &str, css: &str);
    /// Remove the stylesheet registered under `id`; unknown ids are ignored.
    fn remove_stylesheet(&self, id: &str);
}

/// A stylesheet that stays injected until the guard is dropped.
#[must_use = "dropping the guard unmounts the stylesheet"]
pub struct MountedStylesheet {
    host: Arc<dyn StyleHost>,
    id: String,
}

impl MountedStylesheet {
    /// Insert `css` under `id` and keep it until the guard drops.
    pub fn mount(host: Arc<dyn StyleHost>, id: impl Into<String>, css: &str) -> Self {
        let id = id.into();
        host.insert_stylesheet(&id, css);
        debug!(stylesheet = %id, "stylesheet mounted");
        Self { host, id }
    }

    /// Head id the stylesheet was mounted under.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for MountedStylesheet {
    fn drop(&mut self) {
        self.host.remove_stylesheet(&self.id);
        debug!(stylesheet = %self.id, "stylesheet unmounted");
    }
}

/// In-memory document head.
#[derive(Debug, Default)]
pub struct MemoryStyleHost {
    sheets: Mutex<BTreeMap<String, String>>,
}

impl MemoryStyleHost {
    /// Create an empty head.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stylesheet currently mounted, keyed by id.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.sheets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl StyleHost for MemoryStyleHost {
    fn insert_stylesheet(&self, id: &str, css: &str) {
        self.sheets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.to_owned(), css.to_owned());
    }

    fn remove_stylesheet(&self, id: &str) {
        self.sheets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
    }
}

/// Mount the stylesheets of the About section and its banner.
///
/// Each guard unmounts its own stylesheet, so the two components can be torn
/// down independently.
pub fn mount_about_stylesheets(host: &Arc<dyn StyleHost>) -> [MountedStylesheet; 2] {
    [
        MountedStylesheet::mount(
            Arc::clone(host),
            ABOUT_SECTION_STYLESHEET_ID,
            ABOUT_SECTION_CSS,
        ),
        MountedStylesheet::mount(Arc::clone(host), ABOUT_BANNER_STYLESHEET_ID, ABOUT_BANNER_CSS),
    ]
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn stylesheet_lives_as_long_as_the_guard() {
        let host = Arc::new(MemoryStyleHost::new());
        let guard = MountedStylesheet::mount(host.clone(), "about-section", ABOUT_SECTION_CSS);

        assert_eq!(guard.id(), "about-section");
        assert_eq!(
            host.snapshot().get("about-section").map(String::as_str),
            Some(ABOUT_SECTION_CSS)
        );

        drop(guard);
        assert!(host.snapshot().is_empty());
    }

    #[rstest]
    fn about_components_unmount_independently() {
        let memory = Arc::new(MemoryStyleHost::new());
        let host: Arc<dyn StyleHost> = memory.clone();
        let [section, banner] = mount_about_stylesheets(&host);
        assert_eq!(memory.snapshot().len(), 2);

        drop(section);
        let remaining = memory.snapshot();
        assert!(!remaining.contains_key(ABOUT_SECTION_STYLESHEET_ID));
        assert_eq!(
            remaining.get(ABOUT_BANNER_STYLESHEET_ID).map(String::as_str),
            Some(ABOUT_BANNER_CSS)
        );
        drop(banner);
        assert!(memory.snapshot().is_empty());
    }

    #[rstest]
    fn remounting_replaces_the_previous_text() {
        let host = Arc::new(MemoryStyleHost::new());
        let first = MountedStylesheet::mount(host.clone(), "about-banner", "a {}");
        let second = MountedStylesheet::mount(host.clone(), "about-banner", ABOUT_BANNER_CSS);

        assert_eq!(
            host.snapshot().get("about-banner").map(String::as_str),
            Some(ABOUT_BANNER_CSS)
        );
        drop(second);
        drop(first);
        assert!(host.snapshot().is_empty());
    }
}
