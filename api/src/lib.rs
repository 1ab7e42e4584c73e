//! # EventHub API
//!
//! Typed client for the campus events REST backend.
//!
//! - [`EventHubClient`]: reqwest-based HTTP client
//! - [`EventHubApi`]: the trait view models depend on, so tests can inject a fake
//! - [`types`]: wire types for events, users, registrations and payments
//! - [`ApiError`]: transport, status and decode failures
//!
//! Non-2xx responses become [`ApiError::Status`] whose message is the
//! backend's `message` (or `error`) field, falling back to `HTTP <status>`.
//!
//! ## Example
//!
//! ```no_run
//! use eventhub_api::{ApiConfig, EventHubClient, types::EventFilters};
//!
//! # async fn example() -> Result<(), eventhub_api::ApiError> {
//! let client = EventHubClient::new(&ApiConfig::from_env()?)?;
//! let events = client
//!     .list_events(&EventFilters::default().with_category("Technology"))
//!     .await?;
//! println!("{} events", events.len());
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use backend::{ApiFuture, EventHubApi};
pub use client::EventHubClient;
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
