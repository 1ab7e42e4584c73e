//! Event list with client-side search and a local interest overlay
//!
//! Nothing here talks to the backend. The interest set is a presentation
//! overlay: the shown count is the backend's interested-user count plus one
//! when this viewer toggled interest, with no identity deduplication.

use crate::persona::Persona;
use eventhub_api::types::{Event, EventId};
use eventhub_core::{SmallVec, effect::Effect, reducer::Reducer};
use std::collections::HashSet;

/// Shown to admins when there are no events at all
pub const EMPTY_ADMIN: &str = "No events found. Add your first event!";

/// Shown to users when there are no events at all
pub const EMPTY_USER: &str = "No events found. Check back later for upcoming events.";

/// Shown when events exist but none match the search
pub const NO_MATCHES: &str = "No events match your search.";

/// Events whose title or description contains `query`, ignoring case
///
/// An empty or all-whitespace query returns every event in order.
#[must_use]
pub fn filter_events<'a>(events: &'a [Event], query: &str) -> Vec<&'a Event> {
    if query.trim().is_empty() {
        return events.iter().collect();
    }

    let needle = query.to_lowercase();
    events
        .iter()
        .filter(|event| {
            event.title.to_lowercase().contains(&needle)
                || event.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Events this viewer has marked as interesting
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterestOverlay {
    interested: HashSet<EventId>,
}

impl InterestOverlay {
    /// Flip interest in an event; returns whether the viewer is now interested
    pub fn toggle(&mut self, id: EventId) -> bool {
        if self.interested.remove(&id) {
            false
        } else {
            self.interested.insert(id);
            true
        }
    }

    /// Whether the viewer marked this event
    #[must_use]
    pub fn is_interested(&self, id: EventId) -> bool {
        self.interested.contains(&id)
    }

    /// Count to display for an event
    #[must_use]
    pub fn count(&self, event: &Event) -> usize {
        event.interest_count() + usize::from(self.is_interested(event.id))
    }
}

/// State of the event list view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventsListState {
    /// Search box contents
    pub query: String,
    /// Local interest toggles
    pub interest: InterestOverlay,
}

impl EventsListState {
    /// Events to show for a persona
    ///
    /// The search box only exists in the user view, so admins always see
    /// the full list.
    #[must_use]
    pub fn visible<'a>(&self, events: &'a [Event], persona: Persona) -> Vec<&'a Event> {
        if persona.is_admin() {
            events.iter().collect()
        } else {
            filter_events(events, &self.query)
        }
    }

    /// Placeholder text when nothing is visible
    #[must_use]
    pub fn empty_message(&self, events: &[Event], persona: Persona) -> Option<&'static str> {
        if events.is_empty() {
            return Some(if persona.is_admin() {
                EMPTY_ADMIN
            } else {
                EMPTY_USER
            });
        }
        self.visible(events, persona)
            .is_empty()
            .then_some(NO_MATCHES)
    }
}

/// Event list actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventsListAction {
    /// Search box changed
    SetQuery(String),
    /// Interest button pressed
    ToggleInterest(EventId),
}

/// Reducer for the event list
///
/// The environment is the current persona, handed down by the shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventsListReducer;

impl Reducer for EventsListReducer {
    type State = EventsListState;
    type Action = EventsListAction;
    type Environment = Persona;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        persona: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            EventsListAction::SetQuery(query) => {
                state.query = query;
            },
            EventsListAction::ToggleInterest(id) => {
                if persona.is_admin() {
                    tracing::debug!(event_id = %id, "Admins cannot express interest");
                } else {
                    let interested = state.interest.toggle(id);
                    tracing::debug!(event_id = %id, interested, "Interest toggled");
                }
            },
        }

        SmallVec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventhub_testing::{ReducerTest, assertions, fixtures};
    use proptest::prelude::*;

    fn events() -> Vec<Event> {
        vec![
            fixtures::described_event(1, "Hackathon", "2025-09-01", "Annual coding competition"),
            fixtures::described_event(2, "Cultural Fest", "2025-09-15", "Music and dance"),
            fixtures::event(3, "Career Fair", "2025-10-01"),
        ]
    }

    #[test]
    fn test_search_matches_title_or_description() {
        let events = events();

        let by_title = filter_events(&events, "HACK");
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].id, EventId(1));

        let by_description = filter_events(&events, "dance");
        assert_eq!(by_description[0].id, EventId(2));

        assert!(filter_events(&events, "robotics").is_empty());
    }

    #[test]
    fn test_admin_sees_everything_regardless_of_query() {
        let events = events();
        let state = EventsListState {
            query: "robotics".to_string(),
            ..EventsListState::default()
        };

        assert_eq!(state.visible(&events, Persona::Admin).len(), 3);
        assert!(state.visible(&events, Persona::User).is_empty());
        assert_eq!(state.empty_message(&events, Persona::User), Some(NO_MATCHES));
        assert_eq!(state.empty_message(&events, Persona::Admin), None);
    }

    #[test]
    fn test_empty_messages_depend_on_persona() {
        let state = EventsListState::default();
        assert_eq!(state.empty_message(&[], Persona::Admin), Some(EMPTY_ADMIN));
        assert_eq!(state.empty_message(&[], Persona::User), Some(EMPTY_USER));
    }

    #[test]
    fn test_toggle_interest_adds_one() {
        ReducerTest::new(EventsListReducer)
            .with_env(Persona::User)
            .given_state(EventsListState::default())
            .when_action(EventsListAction::ToggleInterest(EventId(1)))
            .then_state(|state| {
                assert!(state.interest.is_interested(EventId(1)));
                let mut event = fixtures::event(1, "Hackathon", "2025-09-01");
                event.interested_users = vec![serde_json_value(7)];
                assert_eq!(state.interest.count(&event), 2);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_admin_cannot_toggle_interest() {
        ReducerTest::new(EventsListReducer)
            .with_env(Persona::Admin)
            .given_state(EventsListState::default())
            .when_action(EventsListAction::ToggleInterest(EventId(1)))
            .then_state(|state| {
                assert!(!state.interest.is_interested(EventId(1)));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_set_query() {
        ReducerTest::new(EventsListReducer)
            .with_env(Persona::User)
            .given_state(EventsListState::default())
            .when_action(EventsListAction::SetQuery("fest".to_string()))
            .then_state(|state| assert_eq!(state.query, "fest"))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    fn serde_json_value(n: i64) -> serde_json::Value {
        serde_json::Value::from(n)
    }

    fn arb_event() -> impl Strategy<Value = Event> {
        (1..1000i64, "[a-zA-Z ]{0,12}", "[a-zA-Z ]{0,24}", 0..5usize).prop_map(
            |(id, title, description, interested)| {
                let mut event = fixtures::described_event(id, &title, "2025-01-01", &description);
                event.interested_users = (0..interested)
                    .map(|n| serde_json_value(i64::try_from(n).unwrap_or_default()))
                    .collect();
                event
            },
        )
    }

    proptest! {
        #[test]
        fn prop_whitespace_query_returns_everything_in_order(
            events in prop::collection::vec(arb_event(), 0..8),
            spaces in "[ \t]{0,4}",
        ) {
            let filtered: Vec<EventId> =
                filter_events(&events, &spaces).iter().map(|e| e.id).collect();
            let original: Vec<EventId> = events.iter().map(|e| e.id).collect();
            prop_assert_eq!(filtered, original);
        }

        #[test]
        fn prop_filter_is_case_insensitive_substring(
            events in prop::collection::vec(arb_event(), 0..8),
            query in "[a-zA-Z]{1,3}",
        ) {
            let upper = filter_events(&events, &query.to_uppercase());
            let lower = filter_events(&events, &query.to_lowercase());
            prop_assert_eq!(upper.len(), lower.len());

            let needle = query.to_lowercase();
            for event in &events {
                let expected = event.title.to_lowercase().contains(&needle)
                    || event.description.to_lowercase().contains(&needle);
                let kept = lower.iter().any(|kept| std::ptr::eq(*kept, event));
                prop_assert_eq!(kept, expected);
            }
        }

        #[test]
        fn prop_toggling_twice_restores_count(event in arb_event()) {
            let mut overlay = InterestOverlay::default();
            let before = overlay.count(&event);

            overlay.toggle(event.id);
            prop_assert_eq!(overlay.count(&event), before + 1);
            overlay.toggle(event.id);
            prop_assert_eq!(overlay.count(&event), before);
        }
    }
}
