//! Backend abstraction injected into the view models
//!
//! Reducers hold an `Arc<dyn EventHubApi>` so the HTTP client can be swapped
//! for an in-memory fake in tests.

use crate::error::ApiResult;
use crate::types::{
    Acknowledgement, CampusEventPayload, DashboardStats, Event, EventEnvelope, EventFilters,
    EventId, EventPatch, HealthStatus, NewEvent, NewUser, PaymentReceipt, PaymentRequest,
    Registration, RegistrationReceipt, User, UserEnvelope, UserId,
};
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by every backend operation
///
/// Futures own everything they need, so they can be moved into effects.
pub type ApiFuture<T> = Pin<Box<dyn Future<Output = ApiResult<T>> + Send>>;

/// Every operation the campus event front ends perform against the backend
pub trait EventHubApi: Send + Sync {
    /// `GET /events` with optional server-side filters
    fn list_events(&self, filters: EventFilters) -> ApiFuture<Vec<Event>>;

    /// `GET /events/{id}`
    fn get_event(&self, id: EventId) -> ApiFuture<Event>;

    /// `POST /events` (admin portal shape)
    fn add_event(&self, event: NewEvent) -> ApiFuture<EventEnvelope>;

    /// `POST /addevent` (Campus Events shape, nested speaker)
    fn add_campus_event(&self, payload: CampusEventPayload) -> ApiFuture<EventEnvelope>;

    /// `PUT /events/{id}`
    fn update_event(&self, id: EventId, patch: EventPatch) -> ApiFuture<EventEnvelope>;

    /// `DELETE /events/{id}`
    fn delete_event(&self, id: EventId) -> ApiFuture<Acknowledgement>;

    /// `GET /categories`
    fn list_categories(&self) -> ApiFuture<Vec<String>>;

    /// `GET /users`
    fn list_users(&self) -> ApiFuture<Vec<User>>;

    /// `POST /users`
    fn add_user(&self, user: NewUser) -> ApiFuture<UserEnvelope>;

    /// `POST /events/{id}/register`
    fn register_for_event(&self, event_id: EventId, user_id: UserId)
    -> ApiFuture<RegistrationReceipt>;

    /// `POST /payments/process`
    fn process_payment(&self, payment: PaymentRequest) -> ApiFuture<PaymentReceipt>;

    /// `GET /registrations`
    fn list_registrations(&self) -> ApiFuture<Vec<Registration>>;

    /// `GET /dashboard/stats`
    fn dashboard_stats(&self) -> ApiFuture<DashboardStats>;

    /// `GET /health`
    fn health(&self) -> ApiFuture<HealthStatus>;
}
