//! Student portal and the event registration workflow
//!
//! Registering for an event walks a modal sequence:
//!
//! ```text
//! Browsing -> EventSelected -> AwaitingUserInfo -> AwaitingConfirmation
//!          -> AwaitingPayment -> Browsing
//! ```
//!
//! Confirming without a known user opens the user form instead of calling
//! the backend. Registering the user does not resume the registration; the
//! driver confirms again. A failed network step raises an error notice and
//! leaves the current modal open.

use crate::environment::AppEnvironment;
use crate::notice::Notice;
use eventhub_api::types::{
    Event, EventFilters, EventId, NewUser, PaymentReceipt, PaymentRequest, Registration,
    RegistrationReceipt, User,
};
use eventhub_core::{SmallVec, async_effect, effect::Effect, reducer::Reducer, smallvec};
use std::fmt;

/// Departments offered by the registration form
pub const DEPARTMENTS: [&str; 5] = [
    "Computer Science",
    "Business Administration",
    "Engineering",
    "Arts",
    "Science",
];

/// Graduation years offered by the registration form
pub const GRADUATION_YEARS: std::ops::RangeInclusive<i32> = 2024..=2027;

/// Shown once the user form is accepted
pub const USER_REGISTERED: &str = "User registered successfully!";

/// Where the registration workflow stands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RegistrationStep {
    /// Event grid, no modal
    #[default]
    Browsing,
    /// Confirmation modal for the selected event
    EventSelected,
    /// User registration form on top of the confirmation modal
    AwaitingUserInfo,
    /// Confirmation modal again, now with a known user
    AwaitingConfirmation,
    /// Payment modal
    AwaitingPayment,
}

impl RegistrationStep {
    /// Whether the confirmation modal is the active one
    #[must_use]
    pub const fn is_confirming(self) -> bool {
        matches!(self, Self::EventSelected | Self::AwaitingConfirmation)
    }
}

/// Card details typed into the payment form
///
/// Never validated beyond presence; `Debug` hides everything but the name.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PaymentCard {
    /// Card number
    pub card_number: String,
    /// Expiry (`MM/YY`)
    pub expiry_date: String,
    /// Card verification value
    pub cvv: String,
    /// Name on card
    pub cardholder_name: String,
}

impl fmt::Debug for PaymentCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentCard")
            .field("cardholder_name", &self.cardholder_name)
            .finish_non_exhaustive()
    }
}

/// Student portal state
#[derive(Debug, Clone, Default)]
pub struct StudentState {
    /// Events matching the current filters
    pub events: Vec<Event>,
    /// Category names for the filter
    pub categories: Vec<String>,
    /// Server-side filters
    pub filters: EventFilters,
    /// A load is in flight
    pub loading: bool,
    /// Page-level load error, shown with a retry
    pub error: Option<String>,
    /// Workflow position
    pub step: RegistrationStep,
    /// Event in the confirmation or payment modal
    pub selected: Option<Event>,
    /// User registered this session
    pub current_user: Option<User>,
    /// Registration awaiting payment
    pub registration: Option<Registration>,
    /// Blocking notices not yet shown
    pub notices: Vec<Notice>,
}

impl StudentState {
    /// Start with filters already applied
    #[must_use]
    pub fn with_filters(filters: EventFilters) -> Self {
        Self {
            filters,
            ..Self::default()
        }
    }

    /// Amount the payment modal charges
    #[must_use]
    pub fn amount_due(&self) -> f64 {
        self.selected.as_ref().map_or(0.0, Event::ticket_price)
    }
}

/// Student portal actions
#[derive(Debug, Clone, PartialEq)]
pub enum StudentAction {
    /// Fetch events and categories together
    LoadData,
    /// Both resources arrived
    DataLoaded {
        /// Events matching the filters
        events: Vec<Event>,
        /// Category names
        categories: Vec<String>,
    },
    /// Either resource failed
    LoadFailed(String),
    /// Category filter changed; reloads
    SetCategory(Option<String>),
    /// Search filter changed; reloads
    SetSearch(Option<String>),
    /// Event card clicked
    SelectEvent(EventId),
    /// Confirm button in the confirmation modal
    ConfirmRegistration,
    /// User registration form submitted
    SubmitUserInfo(NewUser),
    /// Backend created the user
    UserRegistered(User),
    /// Backend rejected the user
    UserRegistrationFailed(String),
    /// Backend registered the user for the event
    RegistrationSucceeded(RegistrationReceipt),
    /// Backend refused the registration
    RegistrationFailed(String),
    /// Payment form submitted
    SubmitPayment(PaymentCard),
    /// Backend accepted the payment
    PaymentSucceeded(PaymentReceipt),
    /// Backend rejected the payment
    PaymentFailed(String),
    /// Close button on the active modal
    CloseModal,
    /// Notices were shown
    DismissNotices,
}

impl StudentAction {
    /// Whether this action ends a load
    #[must_use]
    pub const fn is_load_result(&self) -> bool {
        matches!(self, Self::DataLoaded { .. } | Self::LoadFailed(_))
    }

    /// Whether this action ends user registration
    #[must_use]
    pub const fn is_user_result(&self) -> bool {
        matches!(
            self,
            Self::UserRegistered(_) | Self::UserRegistrationFailed(_)
        )
    }

    /// Whether this action ends event registration
    #[must_use]
    pub const fn is_registration_result(&self) -> bool {
        matches!(
            self,
            Self::RegistrationSucceeded(_) | Self::RegistrationFailed(_)
        )
    }

    /// Whether this action ends the payment step
    ///
    /// A successful payment is only finished once the reload lands.
    #[must_use]
    pub const fn is_payment_result(&self) -> bool {
        self.is_load_result() || matches!(self, Self::PaymentFailed(_))
    }
}

/// Reducer for the student portal
#[derive(Debug, Clone, Copy, Default)]
pub struct StudentReducer;

impl StudentReducer {
    fn load(state: &mut StudentState, env: &AppEnvironment) -> Effect<StudentAction> {
        state.loading = true;
        state.error = None;

        let events = env.api.list_events(state.filters.clone());
        let categories = env.api.list_categories();
        async_effect! {
            match futures::try_join!(events, categories) {
                Ok((events, categories)) => Some(StudentAction::DataLoaded { events, categories }),
                Err(error) => {
                    tracing::warn!(%error, "Failed to load student portal");
                    Some(StudentAction::LoadFailed(error.to_string()))
                },
            }
        }
    }

    fn register(state: &StudentState, env: &AppEnvironment) -> SmallVec<[Effect<StudentAction>; 4]> {
        let (Some(event), Some(user)) = (&state.selected, &state.current_user) else {
            return SmallVec::new();
        };

        tracing::info!(event_id = %event.id, user_id = %user.id, "Registering for event");
        let request = env.api.register_for_event(event.id, user.id);
        smallvec![async_effect! {
            match request.await {
                Ok(receipt) => Some(StudentAction::RegistrationSucceeded(receipt)),
                Err(error) => Some(StudentAction::RegistrationFailed(error.to_string())),
            }
        }]
    }

    fn payment_request(state: &StudentState, card: PaymentCard, env: &AppEnvironment) -> PaymentRequest {
        let payment_id = state
            .registration
            .as_ref()
            .and_then(|registration| registration.payment_id.clone())
            .unwrap_or_else(|| format!("pay_{}", env.clock.now().timestamp_millis()));

        PaymentRequest {
            card_number: card.card_number,
            expiry_date: card.expiry_date,
            cvv: card.cvv,
            cardholder_name: card.cardholder_name,
            amount: state.amount_due(),
            payment_id,
        }
    }
}

impl Reducer for StudentReducer {
    type State = StudentState;
    type Action = StudentAction;
    type Environment = AppEnvironment;

    #[allow(clippy::too_many_lines)] // one arm per workflow transition
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            StudentAction::LoadData => smallvec![Self::load(state, env)],

            StudentAction::DataLoaded { events, categories } => {
                tracing::debug!(events = events.len(), "Student portal loaded");
                state.events = events;
                state.categories = categories;
                state.loading = false;
                SmallVec::new()
            },

            StudentAction::LoadFailed(message) => {
                state.error = Some(message);
                state.loading = false;
                SmallVec::new()
            },

            StudentAction::SetCategory(category) => {
                state.filters.category = category.filter(|c| !c.is_empty());
                smallvec![Self::load(state, env)]
            },

            StudentAction::SetSearch(search) => {
                state.filters.search = search.filter(|s| !s.is_empty());
                smallvec![Self::load(state, env)]
            },

            StudentAction::SelectEvent(id) => {
                match state.events.iter().find(|event| event.id == id) {
                    Some(event) => {
                        state.selected = Some(event.clone());
                        state.registration = None;
                        state.step = RegistrationStep::EventSelected;
                    },
                    None => tracing::warn!(event_id = %id, "Selected event is not listed"),
                }
                SmallVec::new()
            },

            StudentAction::ConfirmRegistration => {
                if !state.step.is_confirming() {
                    return SmallVec::new();
                }
                if state.current_user.is_none() {
                    state.step = RegistrationStep::AwaitingUserInfo;
                    return SmallVec::new();
                }
                Self::register(state, env)
            },

            StudentAction::SubmitUserInfo(user) => {
                if state.step != RegistrationStep::AwaitingUserInfo {
                    return SmallVec::new();
                }

                let request = env.api.add_user(user);
                smallvec![async_effect! {
                    match request.await {
                        Ok(created) => Some(StudentAction::UserRegistered(created.user)),
                        Err(error) => Some(StudentAction::UserRegistrationFailed(error.to_string())),
                    }
                }]
            },

            StudentAction::UserRegistered(user) => {
                tracing::info!(user_id = %user.id, "User registered");
                state.current_user = Some(user);
                if state.step == RegistrationStep::AwaitingUserInfo {
                    state.step = RegistrationStep::AwaitingConfirmation;
                }
                state.notices.push(Notice::info(USER_REGISTERED));
                SmallVec::new()
            },

            StudentAction::RegistrationSucceeded(receipt) => {
                tracing::info!(registration_id = %receipt.registration.id, "Registered for event");
                state.registration = Some(receipt.registration);
                state.step = RegistrationStep::AwaitingPayment;
                state.notices.push(Notice::info(receipt.message));
                SmallVec::new()
            },

            StudentAction::SubmitPayment(card) => {
                if state.step != RegistrationStep::AwaitingPayment {
                    return SmallVec::new();
                }

                let payment = Self::payment_request(state, card, env);
                tracing::info!(payment_id = %payment.payment_id, amount = payment.amount, "Submitting payment");
                let request = env.api.process_payment(payment);
                smallvec![async_effect! {
                    match request.await {
                        Ok(receipt) => Some(StudentAction::PaymentSucceeded(receipt)),
                        Err(error) => Some(StudentAction::PaymentFailed(error.to_string())),
                    }
                }]
            },

            StudentAction::PaymentSucceeded(receipt) => {
                state.step = RegistrationStep::Browsing;
                state.selected = None;
                state.registration = None;
                state.notices.push(Notice::info(receipt.message));
                smallvec![Self::load(state, env)]
            },

            StudentAction::UserRegistrationFailed(message)
            | StudentAction::RegistrationFailed(message)
            | StudentAction::PaymentFailed(message) => {
                tracing::warn!(%message, step = ?state.step, "Workflow step failed");
                state.notices.push(Notice::error(message));
                SmallVec::new()
            },

            StudentAction::CloseModal => {
                state.step = match state.step {
                    RegistrationStep::AwaitingUserInfo => RegistrationStep::EventSelected,
                    _ => {
                        state.selected = None;
                        RegistrationStep::Browsing
                    },
                };
                SmallVec::new()
            },

            StudentAction::DismissNotices => {
                state.notices.clear();
                SmallVec::new()
            },
        }
    }
}
