//! # EventHub
//!
//! View models for the campus event front ends, written as reducers and
//! driven by the [`eventhub_runtime::Store`].
//!
//! - [`campus`]: the Campus Events shell (persona toggle, add and delete)
//! - [`student`]: the student portal and its registration workflow
//! - [`admin`]: the admin portal tabs
//! - [`events_list`], [`add_event_form`], [`event_draft`]: child views
//! - [`render`]: plain-text views of each state
//!
//! Every reducer talks to the backend through [`AppEnvironment`], so tests
//! swap the HTTP client for an in-memory backend.
//!
//! ## Example
//!
//! ```no_run
//! use eventhub::campus::{CampusAction, CampusReducer, CampusState};
//! use eventhub::AppEnvironment;
//! use eventhub_api::{ApiConfig, EventHubClient};
//! use eventhub_runtime::Store;
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = EventHubClient::new(&ApiConfig::from_env()?)?;
//! let store = Store::new(
//!     CampusState::default(),
//!     CampusReducer,
//!     AppEnvironment::live(client),
//! );
//!
//! store
//!     .send_and_wait_for(
//!         CampusAction::LoadEvents,
//!         CampusAction::is_load_result,
//!         Duration::from_secs(30),
//!     )
//!     .await?;
//! let count = store.state(|s| s.events.len()).await;
//! println!("{count} events");
//! # Ok(())
//! # }
//! ```

pub mod add_event_form;
pub mod admin;
pub mod campus;
pub mod config;
pub mod environment;
pub mod event_draft;
pub mod events_list;
pub mod notice;
pub mod persona;
pub mod render;
pub mod student;

pub use config::{Config, ConfigError};
pub use environment::AppEnvironment;
pub use notice::{Notice, NoticeLevel};
pub use persona::Persona;
