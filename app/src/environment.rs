//! Dependencies injected into every reducer

use eventhub_api::{EventHubApi, EventHubClient};
use eventhub_core::environment::{Clock, SystemClock};
use std::fmt;
use std::sync::Arc;

/// Backend and clock shared by the view models
#[derive(Clone)]
pub struct AppEnvironment {
    /// Backend operations
    pub api: Arc<dyn EventHubApi>,
    /// Source of time for client-generated payment references
    pub clock: Arc<dyn Clock>,
}

impl AppEnvironment {
    /// Create an environment from explicit dependencies
    #[must_use]
    pub fn new(api: Arc<dyn EventHubApi>, clock: Arc<dyn Clock>) -> Self {
        Self { api, clock }
    }

    /// Production environment: HTTP client and system clock
    #[must_use]
    pub fn live(client: EventHubClient) -> Self {
        Self::new(Arc::new(client), Arc::new(SystemClock))
    }
}

impl fmt::Debug for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppEnvironment")
            .field("now", &self.clock.now())
            .finish_non_exhaustive()
    }
}
