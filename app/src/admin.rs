//! Admin portal
//!
//! Four tabs over one snapshot of the backend. The snapshot is fetched in a
//! single all-or-nothing load; any failed resource fails the page. Event
//! mutations re-fetch the event list only.

use crate::environment::AppEnvironment;
use crate::event_draft::{DraftField, EventDraft};
use crate::notice::Notice;
use eventhub_api::types::{
    DashboardStats, Event, EventFilters, EventId, EventPatch, Registration, User,
};
use eventhub_core::{SmallVec, async_effect, effect::Effect, reducer::Reducer, smallvec};

/// Admin portal tabs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AdminTab {
    /// Totals and recent registrations
    #[default]
    Dashboard,
    /// Event management
    Events,
    /// Registered users
    Users,
    /// Registrations with payment state
    Registrations,
}

/// Everything the portal loads at once
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminSnapshot {
    /// All events
    pub events: Vec<Event>,
    /// Category names
    pub categories: Vec<String>,
    /// All users
    pub users: Vec<User>,
    /// All registrations with summaries
    pub registrations: Vec<Registration>,
    /// Dashboard totals
    pub stats: DashboardStats,
}

/// Admin portal state
#[derive(Debug, Clone, Default)]
pub struct AdminState {
    /// Visible tab
    pub tab: AdminTab,
    /// Initial load or retry in flight
    pub loading: bool,
    /// Page-level error, shown with a full-page retry
    pub error: Option<String>,
    /// Last loaded resources
    pub data: AdminSnapshot,
    /// Open event creation form
    pub draft: Option<EventDraft>,
    /// A mutation is in flight
    pub saving: bool,
    /// Blocking notices not yet shown
    pub notices: Vec<Notice>,
}

impl AdminState {
    /// Whether the event creation form is open
    #[must_use]
    pub const fn is_draft_open(&self) -> bool {
        self.draft.is_some()
    }
}

/// Admin portal actions
#[derive(Debug, Clone, PartialEq)]
pub enum AdminAction {
    /// Fetch all five resources
    LoadAll,
    /// All five resources arrived
    Loaded(Box<AdminSnapshot>),
    /// At least one resource failed
    LoadFailed(String),
    /// Full-page retry after a load error
    Retry,
    /// Switch tab
    SelectTab(AdminTab),
    /// Open the event creation form
    OpenDraft,
    /// Close the event creation form, discarding it
    CloseDraft,
    /// Event creation form input changed
    SetDraftField(DraftField, String),
    /// Event creation form submitted
    SubmitDraft,
    /// Backend created the event
    EventCreated(Event),
    /// Backend rejected the event
    CreateFailed(String),
    /// Apply a partial update to an event
    UpdateEvent {
        /// Event to change
        id: EventId,
        /// Fields to change
        patch: EventPatch,
    },
    /// Backend applied the update
    EventUpdated(Event),
    /// Backend rejected the update
    UpdateFailed(String),
    /// Delete an event; the caller has already confirmed
    DeleteEvent(EventId),
    /// Backend deleted the event
    EventDeleted(EventId),
    /// Backend refused the delete
    DeleteFailed(String),
    /// Re-fetched event list arrived
    EventsRefreshed(Vec<Event>),
    /// Re-fetching the event list failed
    EventsRefreshFailed(String),
    /// Re-fetch categories from within the event form
    RefreshCategories,
    /// Categories arrived
    CategoriesLoaded(Vec<String>),
    /// Categories could not be fetched
    CategoriesFailed(String),
    /// Notices were shown
    DismissNotices,
}

impl AdminAction {
    /// Whether this action ends the full load
    #[must_use]
    pub const fn is_load_result(&self) -> bool {
        matches!(self, Self::Loaded(_) | Self::LoadFailed(_))
    }

    /// Whether this action ends an event mutation
    ///
    /// A successful mutation is only finished once the event list re-fetch
    /// lands.
    #[must_use]
    pub const fn is_mutation_result(&self) -> bool {
        matches!(
            self,
            Self::EventsRefreshed(_)
                | Self::EventsRefreshFailed(_)
                | Self::CreateFailed(_)
                | Self::UpdateFailed(_)
                | Self::DeleteFailed(_)
        )
    }

    /// Whether this action ends a category refresh
    #[must_use]
    pub const fn is_categories_result(&self) -> bool {
        matches!(self, Self::CategoriesLoaded(_) | Self::CategoriesFailed(_))
    }
}

/// Reducer for the admin portal
#[derive(Debug, Clone, Copy, Default)]
pub struct AdminReducer;

impl AdminReducer {
    fn load_all(state: &mut AdminState, env: &AppEnvironment) -> Effect<AdminAction> {
        state.loading = true;
        state.error = None;

        let events = env.api.list_events(EventFilters::default());
        let categories = env.api.list_categories();
        let users = env.api.list_users();
        let registrations = env.api.list_registrations();
        let stats = env.api.dashboard_stats();
        async_effect! {
            match futures::try_join!(events, categories, users, registrations, stats) {
                Ok((events, categories, users, registrations, stats)) => {
                    Some(AdminAction::Loaded(Box::new(AdminSnapshot {
                        events,
                        categories,
                        users,
                        registrations,
                        stats,
                    })))
                },
                Err(error) => {
                    tracing::warn!(%error, "Failed to load admin portal");
                    Some(AdminAction::LoadFailed(error.to_string()))
                },
            }
        }
    }

    fn refresh_events(env: &AppEnvironment) -> Effect<AdminAction> {
        let request = env.api.list_events(EventFilters::default());
        async_effect! {
            match request.await {
                Ok(events) => Some(AdminAction::EventsRefreshed(events)),
                Err(error) => Some(AdminAction::EventsRefreshFailed(error.to_string())),
            }
        }
    }

    fn failed(state: &mut AdminState, message: String) -> SmallVec<[Effect<AdminAction>; 4]> {
        tracing::warn!(%message, "Admin action failed");
        state.saving = false;
        state.notices.push(Notice::error(message));
        SmallVec::new()
    }
}

impl Reducer for AdminReducer {
    type State = AdminState;
    type Action = AdminAction;
    type Environment = AppEnvironment;

    #[allow(clippy::too_many_lines)] // one arm per portal action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AdminAction::LoadAll | AdminAction::Retry => smallvec![Self::load_all(state, env)],

            AdminAction::Loaded(snapshot) => {
                tracing::debug!(
                    events = snapshot.events.len(),
                    users = snapshot.users.len(),
                    registrations = snapshot.registrations.len(),
                    "Admin portal loaded"
                );
                state.data = *snapshot;
                state.loading = false;
                SmallVec::new()
            },

            AdminAction::LoadFailed(message) => {
                state.error = Some(message);
                state.loading = false;
                SmallVec::new()
            },

            AdminAction::SelectTab(tab) => {
                state.tab = tab;
                SmallVec::new()
            },

            AdminAction::OpenDraft => {
                state.draft.get_or_insert_with(EventDraft::default);
                SmallVec::new()
            },

            AdminAction::CloseDraft => {
                state.draft = None;
                SmallVec::new()
            },

            AdminAction::SetDraftField(field, value) => {
                if let Some(draft) = state.draft.as_mut() {
                    draft.set(field, value);
                }
                SmallVec::new()
            },

            AdminAction::SubmitDraft => {
                let Some(draft) = state.draft.as_ref() else {
                    return SmallVec::new();
                };
                if state.saving {
                    return SmallVec::new();
                }

                let event = draft.normalize();
                tracing::info!(title = %event.title, date = %event.date, "Creating event");
                state.saving = true;
                let request = env.api.add_event(event);
                smallvec![async_effect! {
                    match request.await {
                        Ok(created) => Some(AdminAction::EventCreated(created.event)),
                        Err(error) => Some(AdminAction::CreateFailed(error.to_string())),
                    }
                }]
            },

            AdminAction::EventCreated(event) => {
                tracing::info!(event_id = %event.id, "Event created");
                state.draft = None;
                smallvec![Self::refresh_events(env)]
            },

            AdminAction::UpdateEvent { id, patch } => {
                if patch.is_empty() {
                    tracing::debug!(event_id = %id, "Empty update ignored");
                    return SmallVec::new();
                }

                tracing::info!(event_id = %id, "Updating event");
                state.saving = true;
                let request = env.api.update_event(id, patch);
                smallvec![async_effect! {
                    match request.await {
                        Ok(updated) => Some(AdminAction::EventUpdated(updated.event)),
                        Err(error) => Some(AdminAction::UpdateFailed(error.to_string())),
                    }
                }]
            },

            AdminAction::EventUpdated(event) => {
                tracing::info!(event_id = %event.id, "Event updated");
                smallvec![Self::refresh_events(env)]
            },

            AdminAction::DeleteEvent(id) => {
                tracing::info!(event_id = %id, "Deleting event");
                state.saving = true;
                let request = env.api.delete_event(id);
                smallvec![async_effect! {
                    match request.await {
                        Ok(_) => Some(AdminAction::EventDeleted(id)),
                        Err(error) => Some(AdminAction::DeleteFailed(error.to_string())),
                    }
                }]
            },

            AdminAction::EventDeleted(id) => {
                tracing::info!(event_id = %id, "Event deleted");
                smallvec![Self::refresh_events(env)]
            },

            AdminAction::EventsRefreshed(events) => {
                state.data.events = events;
                state.saving = false;
                SmallVec::new()
            },

            AdminAction::CreateFailed(message)
            | AdminAction::UpdateFailed(message)
            | AdminAction::DeleteFailed(message)
            | AdminAction::EventsRefreshFailed(message)
            | AdminAction::CategoriesFailed(message) => Self::failed(state, message),

            AdminAction::RefreshCategories => {
                let request = env.api.list_categories();
                smallvec![async_effect! {
                    match request.await {
                        Ok(categories) => Some(AdminAction::CategoriesLoaded(categories)),
                        Err(error) => Some(AdminAction::CategoriesFailed(error.to_string())),
                    }
                }]
            },

            AdminAction::CategoriesLoaded(categories) => {
                state.data.categories = categories;
                SmallVec::new()
            },

            AdminAction::DismissNotices => {
                state.notices.clear();
                SmallVec::new()
            },
        }
    }
}
