//! In-memory campus events backend
//!
//! [`InMemoryEventHub`] implements [`EventHubApi`] with the same validation
//! rules and messages as the development backends, records every call, and
//! can be told to fail the next call of a given operation.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use eventhub_api::types::{
    Acknowledgement, CampusEventPayload, DashboardStats, Event, EventEnvelope, EventFilters,
    EventId, EventPatch, HealthStatus, NewEvent, NewUser, PaymentReceipt, PaymentRequest,
    PaymentStatus, RecentRegistration, RegisteredEventSummary, RegistrantSummary, Registration,
    RegistrationReceipt, Speaker, User, UserEnvelope, UserId,
};
use eventhub_api::{ApiError, ApiFuture, ApiResult, EventHubApi};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Categories reported when no event carries one
pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Technology",
    "Cultural",
    "Career",
    "Sports",
    "Academic",
    "Workshop",
    "Seminar",
    "Concert",
    "Exhibition",
    "Other",
];

/// Backend operation, used for call recording and failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `GET /events`
    ListEvents,
    /// `GET /events/{id}`
    GetEvent,
    /// `POST /events`
    AddEvent,
    /// `POST /addevent`
    AddCampusEvent,
    /// `PUT /events/{id}`
    UpdateEvent,
    /// `DELETE /events/{id}`
    DeleteEvent,
    /// `GET /categories`
    ListCategories,
    /// `GET /users`
    ListUsers,
    /// `POST /users`
    AddUser,
    /// `POST /events/{id}/register`
    RegisterForEvent,
    /// `POST /payments/process`
    ProcessPayment,
    /// `GET /registrations`
    ListRegistrations,
    /// `GET /dashboard/stats`
    DashboardStats,
    /// `GET /health`
    Health,
}

#[derive(Debug, Default)]
struct Backend {
    events: Vec<Event>,
    users: Vec<User>,
    registrations: Vec<Registration>,
    calls: Vec<Operation>,
    failures: HashMap<Operation, VecDeque<ApiError>>,
    sequence: u64,
}

impl Backend {
    fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    fn enter(&mut self, op: Operation) -> ApiResult<()> {
        self.calls.push(op);
        match self.failures.get_mut(&op).and_then(VecDeque::pop_front) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn event_index(&self, id: EventId) -> ApiResult<usize> {
        self.events
            .iter()
            .position(|event| event.id == id)
            .ok_or_else(|| status(404, "Event not found"))
    }

    fn next_event_id(&self) -> EventId {
        EventId(self.events.iter().map(|event| event.id.0).max().unwrap_or(0) + 1)
    }

    fn registered_count(&self, id: EventId) -> usize {
        self.registrations
            .iter()
            .filter(|registration| registration.event_id == id)
            .count()
    }

    fn list_events(&self, filters: &EventFilters) -> Vec<Event> {
        let search = filters
            .search
            .as_deref()
            .filter(|search| !search.is_empty())
            .map(str::to_lowercase);

        self.events
            .iter()
            .filter(|event| {
                filters
                    .category
                    .as_deref()
                    .filter(|category| !category.is_empty())
                    .is_none_or(|category| event.category.as_deref() == Some(category))
            })
            .filter(|event| {
                filters
                    .status
                    .as_deref()
                    .filter(|status| !status.is_empty())
                    .is_none_or(|status| event.status.as_deref() == Some(status))
            })
            .filter(|event| {
                search.as_deref().is_none_or(|needle| {
                    event.title.to_lowercase().contains(needle)
                        || event.description.to_lowercase().contains(needle)
                })
            })
            .cloned()
            .collect()
    }

    fn get_event(&self, id: EventId) -> ApiResult<Event> {
        let mut event = self.events[self.event_index(id)?].clone();
        let registered = u32::try_from(self.registered_count(id)).unwrap_or(u32::MAX);
        event.registered_count = Some(registered);
        event.available_spots = event
            .capacity
            .map(|capacity| i64::from(capacity) - i64::from(registered));
        Ok(event)
    }

    fn add_event(&mut self, new: NewEvent) -> ApiResult<EventEnvelope> {
        let text_fields = [
            ("title", &new.title),
            ("description", &new.description),
            ("date", &new.date),
            ("time", &new.time),
            ("location", &new.location),
            ("category", &new.category),
        ];
        if let Some((field, _)) = text_fields.iter().find(|(_, value)| value.is_empty()) {
            return Err(status(400, &format!("{field} is required")));
        }
        let Some(capacity) = new.capacity else {
            return Err(status(400, "capacity is required"));
        };
        let Some(price) = new.price else {
            return Err(status(400, "price is required"));
        };
        if !is_iso_date(&new.date) {
            return Err(status(400, "date must be in YYYY-MM-DD format"));
        }
        if NaiveTime::parse_from_str(&new.time, "%H:%M").is_err() {
            return Err(status(400, "time must be in HH:MM format"));
        }

        let sequence = self.next_sequence();
        let event = Event {
            description: new.description,
            time: Some(new.time),
            location: Some(new.location),
            category: Some(new.category),
            capacity: Some(capacity),
            price: Some(price),
            image: new.image,
            status: Some("active".to_string()),
            organizer: Some(new.organizer.unwrap_or_else(|| "University".to_string())),
            tags: new.tags,
            created_at: Some(timestamp(sequence)),
            ..Event::new(self.next_event_id(), new.title, new.date)
        };
        self.events.push(event.clone());

        Ok(EventEnvelope {
            status: Some("success".to_string()),
            event,
        })
    }

    fn add_campus_event(&mut self, payload: CampusEventPayload) -> ApiResult<EventEnvelope> {
        let title = payload.title.trim();
        let date = payload.date.trim();
        if title.is_empty() || date.is_empty() {
            return Err(status(400, "title and date are required"));
        }
        if !is_iso_date(date) {
            return Err(status(400, "date must be in YYYY-MM-DD format"));
        }

        let event = Event {
            description: payload.description.trim().to_string(),
            form_link: Some(
                payload
                    .form_link
                    .as_deref()
                    .map(str::trim)
                    .unwrap_or_default()
                    .to_string(),
            ),
            speaker: Some(Speaker {
                name: payload.speaker.name.trim().to_string(),
                title: payload.speaker.title.trim().to_string(),
                bio: payload.speaker.bio.trim().to_string(),
            }),
            ..Event::new(self.next_event_id(), title, date)
        };
        self.events.push(event.clone());

        Ok(EventEnvelope {
            status: Some("success".to_string()),
            event,
        })
    }

    fn update_event(&mut self, id: EventId, patch: EventPatch) -> ApiResult<EventEnvelope> {
        let index = self.event_index(id)?;
        if patch.date.as_deref().is_some_and(|date| !is_iso_date(date)) {
            return Err(status(400, "date must be in YYYY-MM-DD format"));
        }
        if patch
            .time
            .as_deref()
            .is_some_and(|time| NaiveTime::parse_from_str(time, "%H:%M").is_err())
        {
            return Err(status(400, "time must be in HH:MM format"));
        }

        let event = &mut self.events[index];
        if let Some(title) = patch.title {
            event.title = title;
        }
        if let Some(description) = patch.description {
            event.description = description;
        }
        if let Some(date) = patch.date {
            event.date = date;
        }
        event.time = patch.time.or(event.time.take());
        event.location = patch.location.or(event.location.take());
        event.category = patch.category.or(event.category.take());
        event.capacity = patch.capacity.or(event.capacity);
        event.price = patch.price.or(event.price);
        event.image = patch.image.or(event.image.take());
        event.status = patch.status.or(event.status.take());
        event.organizer = patch.organizer.or(event.organizer.take());
        if let Some(tags) = patch.tags {
            event.tags = tags;
        }

        Ok(EventEnvelope {
            status: Some("success".to_string()),
            event: event.clone(),
        })
    }

    fn delete_event(&mut self, id: EventId) -> ApiResult<Acknowledgement> {
        let index = self.event_index(id)?;
        self.events.remove(index);
        self.registrations
            .retain(|registration| registration.event_id != id);

        Ok(Acknowledgement {
            status: Some("success".to_string()),
            message: Some("Event deleted".to_string()),
        })
    }

    fn list_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for category in self.events.iter().filter_map(|event| event.category.as_deref()) {
            if !category.is_empty() && !categories.iter().any(|known| known == category) {
                categories.push(category.to_string());
            }
        }
        if categories.is_empty() {
            return DEFAULT_CATEGORIES.iter().map(ToString::to_string).collect();
        }
        categories
    }

    fn add_user(&mut self, new: NewUser) -> ApiResult<UserEnvelope> {
        let text_fields = [
            ("name", &new.name),
            ("email", &new.email),
            ("student_id", &new.student_id),
            ("department", &new.department),
        ];
        if let Some((field, _)) = text_fields.iter().find(|(_, value)| value.is_empty()) {
            return Err(status(400, &format!("{field} is required")));
        }
        if new.graduation_year == 0 {
            return Err(status(400, "graduation_year is required"));
        }
        if self.users.iter().any(|user| user.email == new.email) {
            return Err(status(400, "Email already registered"));
        }
        if self
            .users
            .iter()
            .any(|user| user.student_id.as_deref() == Some(new.student_id.as_str()))
        {
            return Err(status(400, "Student ID already registered"));
        }

        let sequence = self.next_sequence();
        let user = User {
            id: UserId(self.users.iter().map(|user| user.id.0).max().unwrap_or(0) + 1),
            name: new.name,
            email: new.email,
            student_id: Some(new.student_id),
            department: Some(new.department),
            graduation_year: Some(new.graduation_year),
            phone: new.phone,
            created_at: Some(timestamp(sequence)),
        };
        self.users.push(user.clone());

        Ok(UserEnvelope {
            status: Some("success".to_string()),
            user,
        })
    }

    fn register(&mut self, event_id: EventId, user_id: UserId) -> ApiResult<RegistrationReceipt> {
        let index = self.event_index(event_id)?;
        if user_id.0 == 0 {
            return Err(status(400, "user_id is required"));
        }
        if !self.users.iter().any(|user| user.id == user_id) {
            return Err(status(404, "User not found"));
        }
        if self
            .registrations
            .iter()
            .any(|registration| registration.event_id == event_id && registration.user_id == user_id)
        {
            return Err(status(400, "Already registered for this event"));
        }

        let event = &self.events[index];
        let capacity = usize::try_from(event.capacity.unwrap_or(0)).unwrap_or(usize::MAX);
        let amount = event.ticket_price();
        if self.registered_count(event_id) >= capacity {
            return Err(status(400, "Event is full"));
        }

        let sequence = self.next_sequence();
        let registration = Registration {
            id: format!("reg-{sequence}"),
            event_id,
            user_id,
            registration_date: Some(timestamp(sequence)),
            payment_status: PaymentStatus::Pending,
            payment_id: Some(format!("payref-{sequence}")),
            amount,
            payment_date: None,
            user: None,
            event: None,
        };
        self.registrations.push(registration.clone());

        Ok(RegistrationReceipt {
            status: Some("success".to_string()),
            registration,
            message: "Registration successful! Please complete payment.".to_string(),
        })
    }

    fn process_payment(&mut self, payment: &PaymentRequest) -> ApiResult<PaymentReceipt> {
        if payment.payment_id.is_empty() || payment.card_number.is_empty() || payment.amount.abs() < f64::EPSILON
        {
            return Err(status(400, "Missing payment details"));
        }

        let sequence = self.next_sequence();
        let registration = self
            .registrations
            .iter_mut()
            .find(|registration| registration.payment_id.as_deref() == Some(payment.payment_id.as_str()))
            .ok_or_else(|| status(404, "Registration not found"))?;
        registration.payment_status = PaymentStatus::Completed;
        registration.payment_date = Some(timestamp(sequence));

        Ok(PaymentReceipt {
            status: Some("success".to_string()),
            message: "Payment processed successfully".to_string(),
            transaction_id: Some(format!("txn-{sequence}")),
            amount: Some(payment.amount),
        })
    }

    fn registrant(&self, id: UserId) -> Option<RegistrantSummary> {
        self.users
            .iter()
            .find(|user| user.id == id)
            .map(|user| RegistrantSummary {
                name: user.name.clone(),
                email: user.email.clone(),
                student_id: user.student_id.clone(),
            })
    }

    fn event_summary(&self, id: EventId) -> Option<RegisteredEventSummary> {
        self.events
            .iter()
            .find(|event| event.id == id)
            .map(|event| RegisteredEventSummary {
                title: event.title.clone(),
                date: Some(event.date.clone()),
            })
    }

    fn list_registrations(&self) -> Vec<Registration> {
        self.registrations
            .iter()
            .map(|registration| Registration {
                user: self.registrant(registration.user_id),
                event: self.event_summary(registration.event_id),
                ..registration.clone()
            })
            .collect()
    }

    fn dashboard_stats(&self) -> DashboardStats {
        let mut category_stats = BTreeMap::new();
        for event in &self.events {
            if let Some(category) = &event.category {
                *category_stats.entry(category.clone()).or_insert(0) += 1;
            }
        }

        let recent_registrations = self
            .registrations
            .iter()
            .rev()
            .take(5)
            .map(|registration| RecentRegistration {
                id: registration.id.clone(),
                registration_date: registration.registration_date.clone(),
                user: self.registrant(registration.user_id),
                event: self
                    .event_summary(registration.event_id)
                    .map(|summary| RegisteredEventSummary {
                        date: None,
                        ..summary
                    }),
            })
            .collect();

        DashboardStats {
            total_events: self.events.len() as u64,
            total_users: self.users.len() as u64,
            total_registrations: self.registrations.len() as u64,
            total_revenue: self
                .registrations
                .iter()
                .filter(|registration| registration.payment_status == PaymentStatus::Completed)
                .map(|registration| registration.amount)
                .sum(),
            category_stats,
            recent_registrations,
        }
    }
}

fn status(code: u16, message: &str) -> ApiError {
    ApiError::Status {
        status: code,
        message: message.to_string(),
    }
}

fn is_iso_date(date: &str) -> bool {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
}

/// Deterministic timestamp: the sequence number in seconds after 2025-01-01
fn timestamp(sequence: u64) -> String {
    let base = NaiveDate::from_ymd_opt(2025, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN);
    let offset = Duration::seconds(i64::try_from(sequence).unwrap_or(i64::MAX));
    (base + offset).format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// In-memory [`EventHubApi`] for tests
///
/// Cloning shares the underlying data, so a test can keep a handle to
/// inspect what a store did through its own clone.
///
/// # Example
///
/// ```
/// use eventhub_testing::{InMemoryEventHub, Operation, fixtures};
/// use eventhub_api::ApiError;
///
/// let backend = InMemoryEventHub::with_events(fixtures::campus_events());
/// backend.fail_next(
///     Operation::ListEvents,
///     ApiError::Transport("connection refused".to_string()),
/// );
/// assert_eq!(backend.events().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventHub {
    inner: Arc<Mutex<Backend>>,
}

impl InMemoryEventHub {
    /// Create an empty backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend seeded with events
    #[must_use]
    pub fn with_events(events: Vec<Event>) -> Self {
        let backend = Self::new();
        backend.lock().events = events;
        backend
    }

    /// Seed users
    #[must_use]
    pub fn with_users(self, users: Vec<User>) -> Self {
        self.lock().users = users;
        self
    }

    /// Make the next call of `op` fail with `error`
    ///
    /// Failures queue up per operation and are consumed in order.
    pub fn fail_next(&self, op: Operation, error: ApiError) {
        self.lock()
            .failures
            .entry(op)
            .or_default()
            .push_back(error);
    }

    /// Every call made so far, in order
    #[must_use]
    pub fn calls(&self) -> Vec<Operation> {
        self.lock().calls.clone()
    }

    /// Number of calls made to `op`
    #[must_use]
    pub fn call_count(&self, op: Operation) -> usize {
        self.lock().calls.iter().filter(|call| **call == op).count()
    }

    /// Current events
    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        self.lock().events.clone()
    }

    /// Current users
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.lock().users.clone()
    }

    /// Current registrations, without nested summaries
    #[must_use]
    pub fn registrations(&self) -> Vec<Registration> {
        self.lock().registrations.clone()
    }

    /// Share this backend as the trait object view models expect
    #[must_use]
    pub fn shared(&self) -> Arc<dyn EventHubApi> {
        Arc::new(self.clone())
    }

    fn lock(&self) -> MutexGuard<'_, Backend> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn respond<T: Send + 'static>(
        &self,
        op: Operation,
        handler: impl FnOnce(&mut Backend) -> ApiResult<T>,
    ) -> ApiFuture<T> {
        let result = {
            let mut backend = self.lock();
            backend.enter(op).and_then(|()| handler(&mut *backend))
        };
        Box::pin(std::future::ready(result))
    }
}

impl EventHubApi for InMemoryEventHub {
    fn list_events(&self, filters: EventFilters) -> ApiFuture<Vec<Event>> {
        self.respond(Operation::ListEvents, |backend| {
            Ok(backend.list_events(&filters))
        })
    }

    fn get_event(&self, id: EventId) -> ApiFuture<Event> {
        self.respond(Operation::GetEvent, |backend| backend.get_event(id))
    }

    fn add_event(&self, event: NewEvent) -> ApiFuture<EventEnvelope> {
        self.respond(Operation::AddEvent, |backend| backend.add_event(event))
    }

    fn add_campus_event(&self, payload: CampusEventPayload) -> ApiFuture<EventEnvelope> {
        self.respond(Operation::AddCampusEvent, |backend| {
            backend.add_campus_event(payload)
        })
    }

    fn update_event(&self, id: EventId, patch: EventPatch) -> ApiFuture<EventEnvelope> {
        self.respond(Operation::UpdateEvent, |backend| {
            backend.update_event(id, patch)
        })
    }

    fn delete_event(&self, id: EventId) -> ApiFuture<Acknowledgement> {
        self.respond(Operation::DeleteEvent, |backend| backend.delete_event(id))
    }

    fn list_categories(&self) -> ApiFuture<Vec<String>> {
        self.respond(Operation::ListCategories, |backend| {
            Ok(backend.list_categories())
        })
    }

    fn list_users(&self) -> ApiFuture<Vec<User>> {
        self.respond(Operation::ListUsers, |backend| Ok(backend.users.clone()))
    }

    fn add_user(&self, user: NewUser) -> ApiFuture<UserEnvelope> {
        self.respond(Operation::AddUser, |backend| backend.add_user(user))
    }

    fn register_for_event(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> ApiFuture<RegistrationReceipt> {
        self.respond(Operation::RegisterForEvent, |backend| {
            backend.register(event_id, user_id)
        })
    }

    fn process_payment(&self, payment: PaymentRequest) -> ApiFuture<PaymentReceipt> {
        self.respond(Operation::ProcessPayment, |backend| {
            backend.process_payment(&payment)
        })
    }

    fn list_registrations(&self) -> ApiFuture<Vec<Registration>> {
        self.respond(Operation::ListRegistrations, |backend| {
            Ok(backend.list_registrations())
        })
    }

    fn dashboard_stats(&self) -> ApiFuture<DashboardStats> {
        self.respond(Operation::DashboardStats, |backend| {
            Ok(backend.dashboard_stats())
        })
    }

    fn health(&self) -> ApiFuture<HealthStatus> {
        self.respond(Operation::Health, |_| {
            Ok(HealthStatus {
                status: "ok".to_string(),
                timestamp: Some(timestamp(0)),
                database: Some("connected".to_string()),
            })
        })
    }
}
