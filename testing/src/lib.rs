//! # EventHub Testing
//!
//! Testing utilities for the EventHub view models.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given/When/Then harness for reducers
//! - [`mocks::FixedClock`]: deterministic time
//! - [`backend::InMemoryEventHub`]: an in-memory backend with the real
//!   backend's validation rules, call recording and failure injection
//! - [`fixtures`]: sample events and users
//!
//! ## Example
//!
//! ```ignore
//! use eventhub_testing::{InMemoryEventHub, fixtures, test_clock};
//!
//! #[tokio::test]
//! async fn loads_events() {
//!     let backend = InMemoryEventHub::with_events(fixtures::eventhub_events());
//!     let store = Store::new(StudentPortalState::default(), StudentPortalReducer, env(&backend));
//!
//!     store.send(StudentPortalAction::LoadData).await.wait().await;
//!     assert_eq!(store.state(|s| s.events.len()).await, 3);
//! }
//! ```

use chrono::{DateTime, Utc};
use eventhub_core::environment::Clock;

pub mod backend;
pub mod fixtures;
pub mod reducer_test;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use eventhub_testing::mocks::FixedClock;
    /// use eventhub_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded timestamp fails to parse, which cannot happen.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

// Re-export commonly used items
pub use backend::{InMemoryEventHub, Operation};
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};
