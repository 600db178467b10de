//! Route changes requested by the forms.

use tracing::info;

pub trait Navigator: Send + Sync {
    fn push(&self, route: &str);
}

/// Announces the route instead of changing pages; used by the terminal front-end.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn push(&self, route: &str) {
        info!(route, "navigating");
        println!("-> {route}");
    }
}
