//! Campus Events shell driven through the store

#![allow(clippy::unwrap_used)]

use eventhub::AppEnvironment;
use eventhub::Persona;
use eventhub::add_event_form::FormField;
use eventhub::campus::{CampusAction, CampusReducer, CampusState, LOAD_ERROR};
use eventhub_api::ApiError;
use eventhub_api::types::EventId;
use eventhub_runtime::Store;
use eventhub_testing::{InMemoryEventHub, Operation, fixtures, test_clock};
use std::sync::Arc;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(5);

type CampusStore = Store<CampusState, CampusAction, AppEnvironment, CampusReducer>;

fn store(backend: &InMemoryEventHub, persona: Persona) -> CampusStore {
    let env = AppEnvironment::new(backend.shared(), Arc::new(test_clock()));
    let state = CampusState {
        persona,
        ..CampusState::default()
    };
    Store::new(state, CampusReducer, env)
}

async fn fill(store: &CampusStore, fields: &[(FormField, &str)]) {
    for (field, value) in fields {
        store
            .send(CampusAction::SetFormField(*field, (*value).to_string()))
            .await
            .wait()
            .await;
    }
}

#[tokio::test]
async fn added_event_lands_in_date_order() {
    let backend = InMemoryEventHub::with_events(fixtures::campus_events());
    let store = store(&backend, Persona::Admin);
    fill(&store, &[(FormField::Title, "Demo"), (FormField::Date, "2025-01-01")]).await;

    let result = store
        .send_and_wait_for(CampusAction::SubmitForm, CampusAction::is_mutation_result, WAIT)
        .await
        .unwrap();

    assert!(matches!(result, CampusAction::EventsLoaded(_)));
    let (titles, dates, blank) = store
        .state(|s| {
            (
                s.events.iter().map(|e| e.title.clone()).collect::<Vec<_>>(),
                s.events.iter().map(|e| e.date.clone()).collect::<Vec<_>>(),
                s.form.is_blank(),
            )
        })
        .await;
    assert_eq!(titles, vec!["Demo", "Hackathon", "Cultural Fest"]);
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
    assert!(blank);
    assert_eq!(backend.call_count(Operation::AddCampusEvent), 1);

    let stored = backend.events();
    let demo = stored.iter().find(|e| e.title == "Demo").unwrap();
    assert_eq!(demo.id, EventId(3));
    assert_eq!(demo.form_link.as_deref(), Some(""));
}

#[tokio::test]
async fn failed_load_can_be_retried() {
    let backend = InMemoryEventHub::with_events(fixtures::campus_events());
    backend.fail_next(
        Operation::ListEvents,
        ApiError::Transport("connection refused".to_string()),
    );
    let store = store(&backend, Persona::User);

    store
        .send_and_wait_for(CampusAction::LoadEvents, CampusAction::is_load_result, WAIT)
        .await
        .unwrap();
    assert_eq!(store.state(|s| s.error.clone()).await.as_deref(), Some(LOAD_ERROR));

    store
        .send_and_wait_for(CampusAction::Retry, CampusAction::is_load_result, WAIT)
        .await
        .unwrap();
    let (error, count) = store.state(|s| (s.error.clone(), s.events.len())).await;
    assert_eq!(error, None);
    assert_eq!(count, 2);
}

#[tokio::test]
async fn rejected_add_shows_backend_message_without_reload() {
    let backend = InMemoryEventHub::new();
    backend.fail_next(
        Operation::AddCampusEvent,
        ApiError::Status {
            status: 500,
            message: "disk full".to_string(),
        },
    );
    let store = store(&backend, Persona::Admin);
    fill(&store, &[(FormField::Title, "Demo"), (FormField::Date, "2025-01-01")]).await;

    let result = store
        .send_and_wait_for(CampusAction::SubmitForm, CampusAction::is_mutation_result, WAIT)
        .await
        .unwrap();

    assert_eq!(result, CampusAction::AddFailed("disk full".to_string()));
    assert_eq!(
        store.state(|s| s.error.clone()).await.as_deref(),
        Some("Failed to add event: disk full")
    );
    assert_eq!(backend.call_count(Operation::ListEvents), 0);
}

#[tokio::test]
async fn whitespace_title_is_rejected_by_the_backend() {
    let backend = InMemoryEventHub::with_events(fixtures::campus_events());
    let store = store(&backend, Persona::Admin);
    fill(&store, &[(FormField::Title, "   "), (FormField::Date, "2025-01-01")]).await;

    let result = store
        .send_and_wait_for(CampusAction::SubmitForm, CampusAction::is_mutation_result, WAIT)
        .await
        .unwrap();

    assert!(matches!(result, CampusAction::AddFailed(_)));
    assert_eq!(
        store.state(|s| s.error.clone()).await.as_deref(),
        Some("Failed to add event: title and date are required")
    );
    assert_eq!(backend.calls(), vec![Operation::AddCampusEvent]);
    assert_eq!(backend.events().len(), 2);
}

#[tokio::test]
async fn delete_reloads_without_the_event() {
    let backend = InMemoryEventHub::with_events(fixtures::campus_events());
    let store = store(&backend, Persona::Admin);

    store
        .send_and_wait_for(
            CampusAction::DeleteEvent(EventId(1)),
            CampusAction::is_mutation_result,
            WAIT,
        )
        .await
        .unwrap();

    let titles = store
        .state(|s| s.events.iter().map(|e| e.title.clone()).collect::<Vec<_>>())
        .await;
    assert_eq!(titles, vec!["Cultural Fest"]);
    assert_eq!(
        backend.calls(),
        vec![Operation::DeleteEvent, Operation::ListEvents]
    );
}
