//! Navigator for terminal front ends.

use tracing::info;

use crate::domain::ports::{NavigationRequest, Navigator};

/// Navigator that reports each transition as a structured log event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, request: NavigationRequest) {
        info!(
            destination = %request.destination,
            reload = request.reload,
            "navigation requested"
        );
    }
}
