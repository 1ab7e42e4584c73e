//! Campus Events shell
//!
//! Owns the event list and the persona toggle. Events load on start and
//! after every add or delete; the list is always re-fetched in full and
//! sorted by date string.

use crate::add_event_form::{AddEventForm, FormField};
use crate::environment::AppEnvironment;
use crate::events_list::{EventsListAction, EventsListReducer, EventsListState};
use crate::persona::Persona;
use eventhub_api::types::{Event, EventFilters, EventId};
use eventhub_core::{SmallVec, async_effect, effect::Effect, reducer::Reducer, smallvec};

/// Page error shown when the event list cannot be fetched
pub const LOAD_ERROR: &str = "Failed to fetch events";

/// Campus Events state
#[derive(Debug, Clone, Default)]
pub struct CampusState {
    /// Current view mode
    pub persona: Persona,
    /// Events sorted by date
    pub events: Vec<Event>,
    /// A load is in flight
    pub loading: bool,
    /// Page-level error replacing the list until retried
    pub error: Option<String>,
    /// Search and interest state of the list
    pub list: EventsListState,
    /// Add-event form (admin view)
    pub form: AddEventForm,
}

/// Campus Events actions
#[derive(Debug, Clone, PartialEq)]
pub enum CampusAction {
    /// Fetch the event list
    LoadEvents,
    /// Event list arrived
    EventsLoaded(Vec<Event>),
    /// Event list could not be fetched
    EventsLoadFailed(String),
    /// Switch between admin and user views
    TogglePersona,
    /// Forwarded to the event list
    List(EventsListAction),
    /// Form input changed
    SetFormField(FormField, String),
    /// Add-event form submitted
    SubmitForm,
    /// Backend accepted the new event
    EventAdded(Event),
    /// Backend rejected the new event
    AddFailed(String),
    /// Delete an event; the caller has already confirmed
    DeleteEvent(EventId),
    /// Backend deleted the event
    EventDeleted(EventId),
    /// Backend refused the delete
    DeleteFailed(String),
    /// Retry after a page error
    Retry,
}

impl CampusAction {
    /// Whether this action ends a load, successfully or not
    #[must_use]
    pub const fn is_load_result(&self) -> bool {
        matches!(self, Self::EventsLoaded(_) | Self::EventsLoadFailed(_))
    }

    /// Whether this action ends a mutation followed by a reload
    ///
    /// A successful add or delete is only finished once the reload lands.
    #[must_use]
    pub const fn is_mutation_result(&self) -> bool {
        self.is_load_result() || matches!(self, Self::AddFailed(_) | Self::DeleteFailed(_))
    }
}

/// Reducer for the Campus Events shell
#[derive(Debug, Clone, Copy, Default)]
pub struct CampusReducer;

impl CampusReducer {
    fn load(state: &mut CampusState, env: &AppEnvironment) -> Effect<CampusAction> {
        state.loading = true;
        state.error = None;

        let request = env.api.list_events(EventFilters::default());
        async_effect! {
            match request.await {
                Ok(events) => Some(CampusAction::EventsLoaded(events)),
                Err(error) => {
                    tracing::warn!(%error, "Failed to fetch events");
                    Some(CampusAction::EventsLoadFailed(error.to_string()))
                },
            }
        }
    }
}

impl Reducer for CampusReducer {
    type State = CampusState;
    type Action = CampusAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CampusAction::LoadEvents | CampusAction::Retry => {
                smallvec![Self::load(state, env)]
            },

            CampusAction::EventsLoaded(mut events) => {
                events.sort_by(|a, b| a.date.cmp(&b.date));
                tracing::debug!(count = events.len(), "Events loaded");
                state.events = events;
                state.loading = false;
                SmallVec::new()
            },

            CampusAction::EventsLoadFailed(_) => {
                state.error = Some(LOAD_ERROR.to_string());
                state.loading = false;
                SmallVec::new()
            },

            CampusAction::TogglePersona => {
                state.persona = state.persona.toggled();
                tracing::debug!(persona = %state.persona, "Persona switched");
                SmallVec::new()
            },

            CampusAction::List(action) => {
                // The list never produces effects of its own.
                let _ = EventsListReducer.reduce(&mut state.list, action, &state.persona);
                SmallVec::new()
            },

            CampusAction::SetFormField(field, value) => {
                state.form.set(field, value);
                SmallVec::new()
            },

            CampusAction::SubmitForm => {
                if !state.persona.is_admin() {
                    return SmallVec::new();
                }
                let Some(payload) = state.form.submit(state.persona) else {
                    return SmallVec::new();
                };

                tracing::info!(title = %payload.title, date = %payload.date, "Adding event");
                let request = env.api.add_campus_event(payload);
                smallvec![async_effect! {
                    match request.await {
                        Ok(created) => Some(CampusAction::EventAdded(created.event)),
                        Err(error) => Some(CampusAction::AddFailed(error.to_string())),
                    }
                }]
            },

            CampusAction::EventAdded(event) => {
                tracing::info!(event_id = %event.id, "Event added");
                smallvec![Self::load(state, env)]
            },

            CampusAction::AddFailed(message) => {
                tracing::warn!(%message, "Failed to add event");
                state.error = Some(format!("Failed to add event: {message}"));
                SmallVec::new()
            },

            CampusAction::DeleteEvent(id) => {
                if !state.persona.is_admin() {
                    return SmallVec::new();
                }

                tracing::info!(event_id = %id, "Deleting event");
                let request = env.api.delete_event(id);
                smallvec![async_effect! {
                    match request.await {
                        Ok(_) => Some(CampusAction::EventDeleted(id)),
                        Err(error) => Some(CampusAction::DeleteFailed(error.to_string())),
                    }
                }]
            },

            CampusAction::EventDeleted(id) => {
                tracing::info!(event_id = %id, "Event deleted");
                smallvec![Self::load(state, env)]
            },

            CampusAction::DeleteFailed(message) => {
                tracing::warn!(%message, "Failed to delete event");
                state.error = Some(format!("Failed to delete event: {message}"));
                SmallVec::new()
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use eventhub_api::ApiError;
    use eventhub_testing::{InMemoryEventHub, Operation, ReducerTest, assertions, fixtures};
    use std::sync::Arc;

    fn env(backend: &InMemoryEventHub) -> AppEnvironment {
        AppEnvironment::new(backend.shared(), Arc::new(eventhub_testing::test_clock()))
    }

    fn admin_with_form(title: &str, date: &str) -> CampusState {
        let mut state = CampusState {
            persona: Persona::Admin,
            ..CampusState::default()
        };
        state.form.set(FormField::Title, title);
        state.form.set(FormField::Date, date);
        state
    }

    #[test]
    fn test_events_are_sorted_by_date() {
        ReducerTest::new(CampusReducer)
            .with_env(env(&InMemoryEventHub::new()))
            .given_state(CampusState {
                loading: true,
                ..CampusState::default()
            })
            .when_action(CampusAction::EventsLoaded(vec![
                fixtures::event(1, "B", "2025-09-15"),
                fixtures::event(2, "A", "2025-01-01"),
                fixtures::event(3, "C", "2025-09-01"),
            ]))
            .then_state(|state| {
                let dates: Vec<&str> = state.events.iter().map(|e| e.date.as_str()).collect();
                assert_eq!(dates, vec!["2025-01-01", "2025-09-01", "2025-09-15"]);
                assert!(!state.loading);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_load_failure_sets_page_error() {
        ReducerTest::new(CampusReducer)
            .with_env(env(&InMemoryEventHub::new()))
            .given_state(CampusState::default())
            .when_action(CampusAction::EventsLoadFailed("HTTP 500".to_string()))
            .then_state(|state| {
                assert_eq!(state.error.as_deref(), Some(LOAD_ERROR));
            })
            .run();
    }

    #[test]
    fn test_retry_clears_error_and_reloads() {
        ReducerTest::new(CampusReducer)
            .with_env(env(&InMemoryEventHub::new()))
            .given_state(CampusState {
                error: Some(LOAD_ERROR.to_string()),
                ..CampusState::default()
            })
            .when_action(CampusAction::Retry)
            .then_state(|state| {
                assert!(state.error.is_none());
                assert!(state.loading);
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn test_invalid_form_submits_nothing() {
        let backend = InMemoryEventHub::new();
        ReducerTest::new(CampusReducer)
            .with_env(env(&backend))
            .given_state(admin_with_form("", "2025-01-01"))
            .when_action(CampusAction::SubmitForm)
            .then_state(|state| {
                assert_eq!(state.form.date, "2025-01-01");
            })
            .then_effects(assertions::assert_no_effects)
            .run();

        assert_eq!(backend.call_count(Operation::AddCampusEvent), 0);
    }

    #[test]
    fn test_users_cannot_submit_or_delete() {
        let backend = InMemoryEventHub::with_events(fixtures::campus_events());
        let mut state = admin_with_form("Demo", "2025-01-01");
        state.persona = Persona::User;

        let effects = CampusReducer.reduce(&mut state, CampusAction::SubmitForm, &env(&backend));
        assert!(effects.is_empty());
        let effects =
            CampusReducer.reduce(&mut state, CampusAction::DeleteEvent(EventId(1)), &env(&backend));
        assert!(effects.is_empty());
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_submit_posts_payload_and_feeds_back_event() {
        let backend = InMemoryEventHub::new();
        let mut state = admin_with_form("Demo", "2025-01-01");

        let effects = CampusReducer.reduce(&mut state, CampusAction::SubmitForm, &env(&backend));

        assert!(state.form.is_blank());
        let action = eventhub_testing::assertions::run_first_future(effects.into_vec()).await;
        assert!(matches!(action, Some(CampusAction::EventAdded(ref e)) if e.title == "Demo"));
    }

    #[tokio::test]
    async fn test_delete_failure_message() {
        let backend = InMemoryEventHub::with_events(fixtures::campus_events());
        backend.fail_next(
            Operation::DeleteEvent,
            ApiError::Status {
                status: 404,
                message: "Event not found".to_string(),
            },
        );
        let mut state = CampusState {
            persona: Persona::Admin,
            ..CampusState::default()
        };
        let env = env(&backend);

        let effects = CampusReducer.reduce(&mut state, CampusAction::DeleteEvent(EventId(9)), &env);
        let action = eventhub_testing::assertions::run_first_future(effects.into_vec())
            .await
            .unwrap();
        assert_eq!(action, CampusAction::DeleteFailed("Event not found".to_string()));

        CampusReducer.reduce(&mut state, action, &env);
        assert_eq!(
            state.error.as_deref(),
            Some("Failed to delete event: Event not found")
        );
    }

    #[test]
    fn test_toggle_persona_and_list_forwarding() {
        let backend = InMemoryEventHub::new();
        let mut state = CampusState::default();

        CampusReducer.reduce(
            &mut state,
            CampusAction::List(EventsListAction::ToggleInterest(EventId(1))),
            &env(&backend),
        );
        assert!(state.list.interest.is_interested(EventId(1)));

        CampusReducer.reduce(&mut state, CampusAction::TogglePersona, &env(&backend));
        assert_eq!(state.persona, Persona::Admin);

        CampusReducer.reduce(
            &mut state,
            CampusAction::List(EventsListAction::ToggleInterest(EventId(2))),
            &env(&backend),
        );
        assert!(!state.list.interest.is_interested(EventId(2)));
    }
}
