//! Plain-text views
//!
//! Each view borrows a state and renders it through `Display`, so the
//! binary only ever prints.

use crate::admin::{AdminState, AdminTab};
use crate::campus::CampusState;
use crate::notice::Notice;
use crate::persona::Persona;
use crate::student::StudentState;
use chrono::NaiveDate;
use eventhub_api::types::{DashboardStats, Event, Registration, User};
use std::fmt;

/// Shown in place of an empty description
pub const NO_DESCRIPTION: &str = "No description available.";

/// Registrant name when the backend sent no summary
pub const UNKNOWN_USER: &str = "Unknown";

/// Event title when the backend sent no summary
pub const UNKNOWN_EVENT: &str = "Unknown Event";

/// `Free` for zero, otherwise a dollar amount without trailing zeros
#[must_use]
pub fn price_label(price: f64) -> String {
    if price.abs() < f64::EPSILON {
        "Free".to_string()
    } else {
        money(price)
    }
}

/// Dollar amount, e.g. `$25` or `$12.5`
#[must_use]
pub fn money(amount: f64) -> String {
    format!("${amount}")
}

/// `September 1, 2025`, or the raw string when it is not a calendar date
#[must_use]
pub fn long_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_or_else(|_| raw.to_string(), |date| date.format("%B %-d, %Y").to_string())
}

/// Queued notices, one per line
pub struct NoticeList<'a>(pub &'a [Notice]);

impl fmt::Display for NoticeList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for notice in self.0 {
            writeln!(f, "{notice}")?;
        }
        Ok(())
    }
}

/// Campus Events list for the current persona
pub struct CampusView<'a>(pub &'a CampusState);

impl CampusView<'_> {
    fn event(f: &mut fmt::Formatter<'_>, state: &CampusState, event: &Event) -> fmt::Result {
        writeln!(f, "#{} {}", event.id, event.title)?;
        writeln!(f, "    {}", long_date(&event.date))?;
        let description = event.description.trim();
        writeln!(
            f,
            "    {}",
            if description.is_empty() {
                NO_DESCRIPTION
            } else {
                description
            }
        )?;

        if let Some(speaker) = event.featured_speaker() {
            write!(f, "    Featured Speaker: {}", speaker.name.trim())?;
            if !speaker.title.trim().is_empty() {
                write!(f, ", {}", speaker.title.trim())?;
            }
            writeln!(f)?;
            if !speaker.bio.trim().is_empty() {
                writeln!(f, "      {}", speaker.bio.trim())?;
            }
        }

        match state.persona {
            Persona::Admin => writeln!(f, "    [Delete Event]"),
            Persona::User => {
                let marker = if state.list.interest.is_interested(event.id) {
                    " *"
                } else {
                    ""
                };
                writeln!(f, "    {} interested{marker}", state.list.interest.count(event))?;
                if let Some(link) = event.registration_link() {
                    writeln!(f, "    Register Now: {link}")?;
                }
                Ok(())
            },
        }
    }
}

impl fmt::Display for CampusView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        writeln!(f, "Campus Events ({} view)", state.persona)?;

        if let Some(error) = &state.error {
            return writeln!(f, "{error}");
        }
        if state.loading {
            return writeln!(f, "Loading events...");
        }

        if let Some(message) = state.list.empty_message(&state.events, state.persona) {
            return writeln!(f, "{message}");
        }
        for event in state.list.visible(&state.events, state.persona) {
            Self::event(f, state, event)?;
        }
        Ok(())
    }
}

/// Student portal event grid
pub struct StudentView<'a>(pub &'a StudentState);

impl fmt::Display for StudentView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        if let Some(error) = &state.error {
            return writeln!(f, "Error: {error}");
        }
        if state.events.is_empty() {
            return writeln!(f, "No events found.");
        }

        for event in &state.events {
            writeln!(f, "#{} {} [{}]", event.id, event.title, price_label(event.ticket_price()))?;
            write!(f, "    {}", long_date(&event.date))?;
            if let Some(time) = &event.time {
                write!(f, " at {time}")?;
            }
            if let Some(location) = &event.location {
                write!(f, ", {location}")?;
            }
            writeln!(f)?;
            if let Some(category) = &event.category {
                writeln!(f, "    {category}")?;
            }
            if let Some(spots) = event.available_spots {
                writeln!(f, "    {spots} spots left")?;
            }
        }
        Ok(())
    }
}

/// One event as shown in the registration modal
pub struct EventDetailView<'a>(pub &'a Event);

impl fmt::Display for EventDetailView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let event = self.0;
        writeln!(f, "{}", event.title)?;
        let description = event.description.trim();
        if !description.is_empty() {
            writeln!(f, "{description}")?;
        }
        write!(f, "Date: {}", long_date(&event.date))?;
        if let Some(time) = &event.time {
            write!(f, " at {time}")?;
        }
        writeln!(f)?;
        if let Some(location) = &event.location {
            writeln!(f, "Location: {location}")?;
        }
        if let Some(organizer) = &event.organizer {
            writeln!(f, "Organizer: {organizer}")?;
        }
        writeln!(f, "Price: {}", price_label(event.ticket_price()))?;
        if let Some(capacity) = event.capacity {
            writeln!(
                f,
                "Registered: {}/{capacity}",
                event.registered_count.unwrap_or_default()
            )?;
        }
        if let Some(spots) = event.available_spots {
            writeln!(f, "{spots} spots left")?;
        }
        if !event.tags.is_empty() {
            writeln!(f, "Tags: {}", event.tags.join(", "))?;
        }
        Ok(())
    }
}

/// Admin portal, current tab only
pub struct AdminView<'a>(pub &'a AdminState);

impl AdminView<'_> {
    fn dashboard(f: &mut fmt::Formatter<'_>, stats: &DashboardStats) -> fmt::Result {
        writeln!(f, "Total Events: {}", stats.total_events)?;
        writeln!(f, "Total Users: {}", stats.total_users)?;
        writeln!(f, "Total Registrations: {}", stats.total_registrations)?;
        writeln!(f, "Total Revenue: {}", money(stats.total_revenue))?;

        if !stats.category_stats.is_empty() {
            writeln!(f, "Events by Category:")?;
            for (category, count) in &stats.category_stats {
                writeln!(f, "  {category}: {count}")?;
            }
        }

        writeln!(f, "Recent Registrations:")?;
        for recent in &stats.recent_registrations {
            let user = recent.user.as_ref().map_or(UNKNOWN_USER, |u| u.name.as_str());
            let event = recent
                .event
                .as_ref()
                .map_or(UNKNOWN_EVENT, |e| e.title.as_str());
            writeln!(f, "  {user} registered for {event}")?;
        }
        Ok(())
    }

    fn events(f: &mut fmt::Formatter<'_>, events: &[Event]) -> fmt::Result {
        for event in events {
            writeln!(
                f,
                "#{} {} | {} {} | {} | {} | {} | capacity {} | {}",
                event.id,
                event.title,
                event.date,
                event.time.as_deref().unwrap_or_default(),
                event.location.as_deref().unwrap_or_default(),
                event.category.as_deref().unwrap_or_default(),
                price_label(event.ticket_price()),
                event.capacity.unwrap_or_default(),
                event.status.as_deref().unwrap_or("active"),
            )?;
        }
        Ok(())
    }

    fn users(f: &mut fmt::Formatter<'_>, users: &[User]) -> fmt::Result {
        for user in users {
            writeln!(
                f,
                "#{} {} <{}> | {} | {} | {}",
                user.id,
                user.name,
                user.email,
                user.student_id.as_deref().unwrap_or_default(),
                user.department.as_deref().unwrap_or_default(),
                user.graduation_year
                    .map(|year| year.to_string())
                    .unwrap_or_default(),
            )?;
        }
        Ok(())
    }

    fn registrations(f: &mut fmt::Formatter<'_>, registrations: &[Registration]) -> fmt::Result {
        for registration in registrations {
            let user = registration
                .user
                .as_ref()
                .map_or(UNKNOWN_USER, |u| u.name.as_str());
            let event = registration
                .event
                .as_ref()
                .map_or(UNKNOWN_EVENT, |e| e.title.as_str());
            writeln!(
                f,
                "{} | {user} | {event} | {} | {}",
                registration.id,
                money(registration.amount),
                registration.payment_status,
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for AdminView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        if let Some(error) = &state.error {
            return writeln!(f, "Error: {error}");
        }

        match state.tab {
            AdminTab::Dashboard => Self::dashboard(f, &state.data.stats),
            AdminTab::Events => Self::events(f, &state.data.events),
            AdminTab::Users => Self::users(f, &state.data.users),
            AdminTab::Registrations => Self::registrations(f, &state.data.registrations),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::AdminSnapshot;
    use eventhub_api::types::{
        EventId, PaymentStatus, RecentRegistration, RegistrantSummary, Speaker, UserId,
    };
    use eventhub_testing::fixtures;

    #[test]
    fn test_price_labels() {
        assert_eq!(price_label(0.0), "Free");
        assert_eq!(price_label(25.0), "$25");
        assert_eq!(price_label(12.5), "$12.5");
    }

    #[test]
    fn test_long_date_falls_back_to_raw() {
        assert_eq!(long_date("2025-09-01"), "September 1, 2025");
        assert_eq!(long_date("next week"), "next week");
    }

    #[test]
    fn test_campus_user_view() {
        let mut state = CampusState {
            events: fixtures::campus_events(),
            ..CampusState::default()
        };
        state.events[0].description = String::new();
        state.list.interest.toggle(EventId(1));

        let text = CampusView(&state).to_string();
        assert!(text.contains("Campus Events (User view)"));
        assert!(text.contains(NO_DESCRIPTION));
        assert!(text.contains("1 interested *"));
        assert!(text.contains("Register Now: "));
        assert!(!text.contains("[Delete Event]"));
    }

    #[test]
    fn test_campus_admin_view_hides_user_actions() {
        let mut state = CampusState {
            persona: Persona::Admin,
            events: vec![fixtures::event(7, "Open Day", "2025-03-01")],
            ..CampusState::default()
        };
        state.events[0].speaker = Some(Speaker {
            name: "Grace Hopper".to_string(),
            title: "Rear Admiral".to_string(),
            bio: String::new(),
        });

        let text = CampusView(&state).to_string();
        assert!(text.contains("Featured Speaker: Grace Hopper, Rear Admiral"));
        assert!(text.contains("[Delete Event]"));
        assert!(!text.contains("interested"));
    }

    #[test]
    fn test_campus_error_replaces_list() {
        let state = CampusState {
            error: Some("Failed to fetch events".to_string()),
            events: fixtures::campus_events(),
            ..CampusState::default()
        };
        let text = CampusView(&state).to_string();
        assert!(text.contains("Failed to fetch events"));
        assert!(!text.contains("Hackathon"));
    }

    #[test]
    fn test_empty_dashboard_shows_zeroes() {
        let text = AdminView(&AdminState::default()).to_string();
        assert!(text.contains("Total Events: 0"));
        assert!(text.contains("Total Revenue: $0"));
    }

    #[test]
    fn test_registrations_without_summaries() {
        let registration = Registration {
            id: "reg-1".to_string(),
            event_id: EventId(1),
            user_id: UserId(1),
            registration_date: None,
            payment_status: PaymentStatus::Completed,
            payment_id: None,
            amount: 25.0,
            payment_date: None,
            user: None,
            event: None,
        };
        let state = AdminState {
            tab: AdminTab::Registrations,
            data: AdminSnapshot {
                registrations: vec![registration],
                ..AdminSnapshot::default()
            },
            ..AdminState::default()
        };

        let text = AdminView(&state).to_string();
        assert_eq!(text, "reg-1 | Unknown | Unknown Event | $25 | completed\n");
    }

    #[test]
    fn test_recent_registration_names() {
        let mut state = AdminState::default();
        state.data.stats.recent_registrations = vec![RecentRegistration {
            id: "reg-1".to_string(),
            registration_date: None,
            user: Some(RegistrantSummary {
                name: "John Doe".to_string(),
                email: "john@student.edu".to_string(),
                student_id: None,
            }),
            event: None,
        }];

        let text = AdminView(&state).to_string();
        assert!(text.contains("John Doe registered for Unknown Event"));
    }

    #[test]
    fn test_event_detail_shows_spots() {
        let mut event = fixtures::event(2, "Career Fair 2025", "2025-10-15");
        event.description = String::new();
        event.capacity = Some(200);
        event.registered_count = Some(150);
        event.available_spots = Some(50);
        event.tags = vec!["career".to_string(), "networking".to_string()];

        let text = EventDetailView(&event).to_string();
        assert!(text.starts_with("Career Fair 2025\nDate: October 15, 2025\n"));
        assert!(text.contains("Price: Free"));
        assert!(text.contains("Registered: 150/200"));
        assert!(text.contains("50 spots left"));
        assert!(text.contains("Tags: career, networking"));
    }

    #[test]
    fn test_student_error_page() {
        let state = StudentState {
            error: Some("HTTP 500".to_string()),
            ..StudentState::default()
        };
        assert_eq!(StudentView(&state).to_string(), "Error: HTTP 500\n");
    }
}
