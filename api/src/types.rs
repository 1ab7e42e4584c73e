//! Wire types for the campus events backend
//!
//! The backend is loose about nulls (a missing description arrives as `null`
//! or `""` depending on the endpoint), so string and list fields that the
//! views always render decode `null` as their default.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Decode `null` (or a missing field, with `#[serde(default)]`) as `T::default()`
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Backend-assigned event identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub i64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Backend-assigned user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Featured speaker embedded in an event
///
/// Every field is optional; an absent field is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    /// Speaker name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Job title or affiliation
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Short biography
    #[serde(default, deserialize_with = "null_as_default")]
    pub bio: String,
}

impl Speaker {
    /// A speaker is only shown when it has a name
    #[must_use]
    pub fn is_named(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// A campus event as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier
    pub id: EventId,
    /// Event title
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Free-text description
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Calendar date as sent by the backend (`YYYY-MM-DD`)
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    /// Start time (`HH:MM`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// Venue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Category name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Maximum number of registrations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    /// Ticket price in dollars
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Lifecycle status (`active`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Organising department
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    /// Free-form tags
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    /// Featured speaker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<Speaker>,
    /// External registration form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_link: Option<String>,
    /// Opaque identifiers of users who expressed interest
    #[serde(
        rename = "interestedUsers",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub interested_users: Vec<serde_json::Value>,
    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Registrations so far (single-event endpoint only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_count: Option<u32>,
    /// Remaining spots (single-event endpoint only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_spots: Option<i64>,
}

impl Event {
    /// Create an event with only the fields every backend variant sends
    #[must_use]
    pub fn new(id: EventId, title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            date: date.into(),
            time: None,
            location: None,
            category: None,
            capacity: None,
            price: None,
            image: None,
            status: None,
            organizer: None,
            tags: Vec::new(),
            speaker: None,
            form_link: None,
            interested_users: Vec::new(),
            created_at: None,
            registered_count: None,
            available_spots: None,
        }
    }

    /// Parsed calendar date, if the backend sent a valid one
    #[must_use]
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Interest count as reported by the backend
    #[must_use]
    pub fn interest_count(&self) -> usize {
        self.interested_users.len()
    }

    /// Price charged at registration; events without a price are free
    #[must_use]
    pub fn ticket_price(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    /// Speaker to feature, when one with a name is attached
    #[must_use]
    pub fn featured_speaker(&self) -> Option<&Speaker> {
        self.speaker.as_ref().filter(|speaker| speaker.is_named())
    }

    /// Registration form link, when a non-empty one is attached
    #[must_use]
    pub fn registration_link(&self) -> Option<&str> {
        self.form_link
            .as_deref()
            .map(str::trim)
            .filter(|link| !link.is_empty())
    }
}

/// Response wrapper for endpoints that return a single event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// `success` on 2xx
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// The created or updated event
    pub event: Event,
}

/// Event creation payload for `POST /events` (admin portal)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    /// Event title
    pub title: String,
    /// Description
    pub description: String,
    /// Calendar date (`YYYY-MM-DD`)
    pub date: String,
    /// Start time (`HH:MM`)
    pub time: String,
    /// Venue
    pub location: String,
    /// Category name
    pub category: String,
    /// Capacity; `None` when the form value was not a number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    /// Price; `None` when the form value was not a number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Organising department
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    /// Tags, already trimmed
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Event creation payload for `POST /addevent` (Campus Events)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampusEventPayload {
    /// Event title
    pub title: String,
    /// Description
    pub description: String,
    /// Calendar date (`YYYY-MM-DD`)
    pub date: String,
    /// Featured speaker (fields may be empty)
    pub speaker: Speaker,
    /// Registration form link, only sent by admins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_link: Option<String>,
}

/// Partial update for `PUT /events/{id}`; unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPatch {
    /// New title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New date (`YYYY-MM-DD`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// New time (`HH:MM`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    /// New venue
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// New category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// New capacity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    /// New price
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// New image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// New status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// New organiser
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    /// Replacement tag list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl EventPatch {
    /// True when the patch would not change anything
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Server-side filters for `GET /events`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilters {
    /// Exact category match
    pub category: Option<String>,
    /// Exact status match
    pub status: Option<String>,
    /// Case-insensitive search over title and description
    pub search: Option<String>,
}

impl EventFilters {
    /// Filter by category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filter by status
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Filter by search text
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Query parameters to send; empty values are omitted
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("category", self.category.as_deref()),
            ("status", self.status.as_deref()),
            ("search", self.search.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.filter(|v| !v.is_empty()).map(|v| (key, v)))
        .collect()
    }
}

/// A registered student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: UserId,
    /// Full name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Email address
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    /// Student number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    /// Department
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Expected graduation year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<i32>,
    /// Phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// User registration payload for `POST /users`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Student number
    pub student_id: String,
    /// Department
    pub department: String,
    /// Expected graduation year
    pub graduation_year: i32,
    /// Phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Response wrapper for `POST /users`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEnvelope {
    /// `success` on 2xx
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// The created user
    pub user: User,
}

/// Body of `POST /events/{id}/register`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// The registering user
    pub user_id: UserId,
}

/// Payment state of a registration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Awaiting payment
    #[default]
    Pending,
    /// Paid
    Completed,
    /// Any status this client does not know about
    #[serde(other)]
    Unknown,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Registrant summary nested in registration listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrantSummary {
    /// Full name
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Email address
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    /// Student number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
}

/// Event summary nested in registration listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredEventSummary {
    /// Event title
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// Event date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// A user's registration for an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    /// Registration identifier
    pub id: String,
    /// Event registered for
    pub event_id: EventId,
    /// Registered user
    pub user_id: UserId,
    /// When the registration was made
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<String>,
    /// Payment state
    #[serde(default)]
    pub payment_status: PaymentStatus,
    /// Backend payment reference used to settle this registration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    /// Amount due
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    /// When payment completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<String>,
    /// Registrant summary (listing endpoint only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<RegistrantSummary>,
    /// Event summary (listing endpoint only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<RegisteredEventSummary>,
}

/// Response of `POST /events/{id}/register`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationReceipt {
    /// `success` on 2xx
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// The new registration
    pub registration: Registration,
    /// Message to show the user
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

/// Body of `POST /payments/process`
///
/// Card details are never validated beyond presence. `Debug` masks them.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Card number as typed
    pub card_number: String,
    /// Expiry as typed (`MM/YY`)
    pub expiry_date: String,
    /// Card verification value
    pub cvv: String,
    /// Name on card
    pub cardholder_name: String,
    /// Amount to charge
    pub amount: f64,
    /// Payment reference
    pub payment_id: String,
}

impl fmt::Debug for PaymentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits: Vec<char> = self
            .card_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        let last_four: String = digits[digits.len().saturating_sub(4)..].iter().collect();

        f.debug_struct("PaymentRequest")
            .field("card_number", &format_args!("**** {last_four}"))
            .field("expiry_date", &self.expiry_date)
            .field("cvv", &"***")
            .field("cardholder_name", &self.cardholder_name)
            .field("amount", &self.amount)
            .field("payment_id", &self.payment_id)
            .finish()
    }
}

/// Response of `POST /payments/process`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    /// `success` on 2xx
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Message to show the user
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    /// Gateway transaction identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    /// Amount charged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

/// A registration in the dashboard's recent list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentRegistration {
    /// Registration identifier
    pub id: String,
    /// When the registration was made
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<String>,
    /// Registrant summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<RegistrantSummary>,
    /// Event summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<RegisteredEventSummary>,
}

/// Response of `GET /dashboard/stats`; missing fields are zero
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Number of events
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_events: u64,
    /// Number of users
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_users: u64,
    /// Number of registrations
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_registrations: u64,
    /// Revenue from completed payments
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_revenue: f64,
    /// Events per category
    #[serde(default, deserialize_with = "null_as_default")]
    pub category_stats: BTreeMap<String, u64>,
    /// Latest registrations, newest first
    #[serde(default, deserialize_with = "null_as_default")]
    pub recent_registrations: Vec<RecentRegistration>,
}

/// Response of acknowledgement-only endpoints such as `DELETE /events/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    /// `success` on 2xx
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Human-readable confirmation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `ok` when healthy
    pub status: String,
    /// Server time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Database connectivity summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}
