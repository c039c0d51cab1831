//! Driven port for page navigation.

use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Pages the login flow can send a visitor to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    /// Landing page after a regular sign-in.
    Landing,
    /// Administrator dashboard.
    AdminDashboard,
    /// Static sign-up link next to the form.
    Register,
}

impl Destination {
    /// Route path for the destination.
    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::AdminDashboard => "/admin-dashboard",
            Self::Register => "/register",
        }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A navigation instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationRequest {
    pub destination: Destination,
    /// Reload all client state after the transition.
    pub reload: bool,
}

impl NavigationRequest {
    pub const fn to(destination: Destination) -> Self {
        Self {
            destination,
            reload: false,
        }
    }

    pub const fn with_reload(destination: Destination) -> Self {
        Self {
            destination,
            reload: true,
        }
    }
}

/// Port that performs navigation.
pub trait Navigator: Send + Sync {
    /// Leave the login page for `request.destination`.
    fn navigate(&self, request: NavigationRequest);
}

/// Navigator that remembers every request instead of navigating.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    requests: Mutex<Vec<NavigationRequest>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<NavigationRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, request: NavigationRequest) {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Destination::Landing, "/")]
    #[case(Destination::AdminDashboard, "/admin-dashboard")]
    #[case(Destination::Register, "/register")]
    fn destinations_map_to_routes(#[case] destination: Destination, #[case] path: &str) {
        assert_eq!(destination.path(), path);
    }

    #[rstest]
    fn recording_navigator_keeps_order() {
        let navigator = RecordingNavigator::new();
        navigator.navigate(NavigationRequest::to(Destination::Register));
        navigator.navigate(NavigationRequest::with_reload(Destination::Landing));
        assert_eq!(
            navigator.requests(),
            vec![
                NavigationRequest::to(Destination::Register),
                NavigationRequest::with_reload(Destination::Landing),
            ]
        );
    }
}
