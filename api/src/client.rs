//! HTTP client for the campus events backend

use crate::backend::{ApiFuture, EventHubApi};
use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::types::{
    Acknowledgement, CampusEventPayload, DashboardStats, Event, EventEnvelope, EventFilters,
    EventId, EventPatch, HealthStatus, NewEvent, NewUser, PaymentReceipt, PaymentRequest,
    RegisterRequest, Registration, RegistrationReceipt, User, UserEnvelope, UserId,
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Campus events API client
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct EventHubClient {
    client: Client,
    base_url: Arc<str>,
}

impl std::fmt::Debug for EventHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHubClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl EventHubClient {
    /// Create a client from explicit settings
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: Arc::from(config.base_url()),
        })
    }

    /// Create a client with settings from the environment
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] for an unusable
    /// `EVENTHUB_API_BASE_URL`, or [`ApiError::Transport`] if the HTTP client
    /// cannot be built.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(&ApiConfig::from_env()?)
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send a request and return the raw body of a 2xx response
    async fn fetch(&self, request: RequestBuilder, path: &str) -> ApiResult<String> {
        tracing::debug!(path, "Sending request");

        let response = request.send().await.map_err(|e| {
            tracing::warn!(path, error = %e, "Request failed");
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            let error = ApiError::from_status_body(status.as_u16(), &body);
            tracing::warn!(path, status = status.as_u16(), error = %error, "Backend rejected request");
            return Err(error);
        }

        tracing::trace!(path, status = status.as_u16(), bytes = body.len(), "Response received");
        Ok(body)
    }

    /// Send a request and decode the JSON body of a 2xx response
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, path: &str) -> ApiResult<T> {
        let body = self.fetch(request, path).await?;
        decode(&body, path)
    }

    /// List events, optionally filtered server-side
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or an
    /// undecodable body.
    pub async fn list_events(&self, filters: &EventFilters) -> ApiResult<Vec<Event>> {
        let request = self
            .client
            .get(self.url("/events"))
            .query(&filters.query_pairs());
        self.send(request, "/events").await
    }

    /// Fetch one event with its registration counts
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or an
    /// undecodable body.
    pub async fn get_event(&self, id: EventId) -> ApiResult<Event> {
        let path = format!("/events/{id}");
        self.send(self.client.get(self.url(&path)), &path).await
    }

    /// Create an event through the admin endpoint
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or an
    /// undecodable body.
    pub async fn add_event(&self, event: &NewEvent) -> ApiResult<EventEnvelope> {
        let request = self.client.post(self.url("/events")).json(event);
        self.send(request, "/events").await
    }

    /// Create an event through the Campus Events endpoint
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or an
    /// undecodable body.
    pub async fn add_campus_event(&self, payload: &CampusEventPayload) -> ApiResult<EventEnvelope> {
        let request = self.client.post(self.url("/addevent")).json(payload);
        self.send(request, "/addevent").await
    }

    /// Apply a partial update to an event
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or an
    /// undecodable body.
    pub async fn update_event(&self, id: EventId, patch: &EventPatch) -> ApiResult<EventEnvelope> {
        let path = format!("/events/{id}");
        let request = self.client.put(self.url(&path)).json(patch);
        self.send(request, &path).await
    }

    /// Delete an event
    ///
    /// An empty 2xx body is accepted as a bare acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or a
    /// non-empty body that is not an acknowledgement.
    pub async fn delete_event(&self, id: EventId) -> ApiResult<Acknowledgement> {
        let path = format!("/events/{id}");
        let body = self.fetch(self.client.delete(self.url(&path)), &path).await?;
        if body.trim().is_empty() {
            return Ok(Acknowledgement::default());
        }
        decode(&body, &path)
    }

    /// List event categories
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or an
    /// undecodable body.
    pub async fn list_categories(&self) -> ApiResult<Vec<String>> {
        self.send(self.client.get(self.url("/categories")), "/categories")
            .await
    }

    /// List registered users
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or an
    /// undecodable body.
    pub async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.send(self.client.get(self.url("/users")), "/users").await
    }

    /// Register a new user
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or an
    /// undecodable body.
    pub async fn add_user(&self, user: &NewUser) -> ApiResult<UserEnvelope> {
        let request = self.client.post(self.url("/users")).json(user);
        self.send(request, "/users").await
    }

    /// Register a user for an event
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or an
    /// undecodable body.
    pub async fn register_for_event(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> ApiResult<RegistrationReceipt> {
        let path = format!("/events/{event_id}/register");
        let request = self
            .client
            .post(self.url(&path))
            .json(&RegisterRequest { user_id });
        self.send(request, &path).await
    }

    /// Submit a (mocked) card payment
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or an
    /// undecodable body.
    pub async fn process_payment(&self, payment: &PaymentRequest) -> ApiResult<PaymentReceipt> {
        let request = self.client.post(self.url("/payments/process")).json(payment);
        self.send(request, "/payments/process").await
    }

    /// List all registrations with user and event summaries
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or an
    /// undecodable body.
    pub async fn list_registrations(&self) -> ApiResult<Vec<Registration>> {
        self.send(self.client.get(self.url("/registrations")), "/registrations")
            .await
    }

    /// Fetch dashboard totals
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or an
    /// undecodable body.
    pub async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        self.send(self.client.get(self.url("/dashboard/stats")), "/dashboard/stats")
            .await
    }

    /// Check backend health
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, a non-2xx status, or an
    /// undecodable body.
    pub async fn health(&self) -> ApiResult<HealthStatus> {
        self.send(self.client.get(self.url("/health")), "/health").await
    }
}

fn decode<T: DeserializeOwned>(body: &str, path: &str) -> ApiResult<T> {
    serde_json::from_str(body).map_err(|e| {
        tracing::warn!(path, error = %e, "Response did not match the expected shape");
        ApiError::Decode(e.to_string())
    })
}

impl EventHubApi for EventHubClient {
    fn list_events(&self, filters: EventFilters) -> ApiFuture<Vec<Event>> {
        let client = self.clone();
        Box::pin(async move { client.list_events(&filters).await })
    }

    fn get_event(&self, id: EventId) -> ApiFuture<Event> {
        let client = self.clone();
        Box::pin(async move { client.get_event(id).await })
    }

    fn add_event(&self, event: NewEvent) -> ApiFuture<EventEnvelope> {
        let client = self.clone();
        Box::pin(async move { client.add_event(&event).await })
    }

    fn add_campus_event(&self, payload: CampusEventPayload) -> ApiFuture<EventEnvelope> {
        let client = self.clone();
        Box::pin(async move { client.add_campus_event(&payload).await })
    }

    fn update_event(&self, id: EventId, patch: EventPatch) -> ApiFuture<EventEnvelope> {
        let client = self.clone();
        Box::pin(async move { client.update_event(id, &patch).await })
    }

    fn delete_event(&self, id: EventId) -> ApiFuture<Acknowledgement> {
        let client = self.clone();
        Box::pin(async move { client.delete_event(id).await })
    }

    fn list_categories(&self) -> ApiFuture<Vec<String>> {
        let client = self.clone();
        Box::pin(async move { client.list_categories().await })
    }

    fn list_users(&self) -> ApiFuture<Vec<User>> {
        let client = self.clone();
        Box::pin(async move { client.list_users().await })
    }

    fn add_user(&self, user: NewUser) -> ApiFuture<UserEnvelope> {
        let client = self.clone();
        Box::pin(async move { client.add_user(&user).await })
    }

    fn register_for_event(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> ApiFuture<RegistrationReceipt> {
        let client = self.clone();
        Box::pin(async move { client.register_for_event(event_id, user_id).await })
    }

    fn process_payment(&self, payment: PaymentRequest) -> ApiFuture<PaymentReceipt> {
        let client = self.clone();
        Box::pin(async move { client.process_payment(&payment).await })
    }

    fn list_registrations(&self) -> ApiFuture<Vec<Registration>> {
        let client = self.clone();
        Box::pin(async move { client.list_registrations().await })
    }

    fn dashboard_stats(&self) -> ApiFuture<DashboardStats> {
        let client = self.clone();
        Box::pin(async move { client.dashboard_stats().await })
    }

    fn health(&self) -> ApiFuture<HealthStatus> {
        let client = self.clone();
        Box::pin(async move { client.health().await })
    }
}
