//! Campus Events add-event form
//!
//! Holds the raw field values. [`AddEventForm::submit`] validates them,
//! builds the `/addevent` payload and clears the form; invalid input is
//! silently ignored and left untouched.

use crate::persona::Persona;
use chrono::NaiveDate;
use eventhub_api::types::{CampusEventPayload, Speaker};

/// Form inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    /// Event title (required)
    Title,
    /// Description
    Description,
    /// Date, `YYYY-MM-DD` (required)
    Date,
    /// Speaker name
    SpeakerName,
    /// Speaker title
    SpeakerTitle,
    /// Speaker biography
    SpeakerBio,
    /// Registration form link (admin only)
    FormLink,
}

/// Raw add-event form contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddEventForm {
    /// Event title
    pub title: String,
    /// Description
    pub description: String,
    /// Date as typed
    pub date: String,
    /// Speaker name
    pub speaker_name: String,
    /// Speaker title
    pub speaker_title: String,
    /// Speaker biography
    pub speaker_bio: String,
    /// Registration form link
    pub form_link: String,
}

impl AddEventForm {
    /// Replace one field
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Title => self.title = value,
            FormField::Description => self.description = value,
            FormField::Date => self.date = value,
            FormField::SpeakerName => self.speaker_name = value,
            FormField::SpeakerTitle => self.speaker_title = value,
            FormField::SpeakerBio => self.speaker_bio = value,
            FormField::FormLink => self.form_link = value,
        }
    }

    /// Current value of one field
    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Description => &self.description,
            FormField::Date => &self.date,
            FormField::SpeakerName => &self.speaker_name,
            FormField::SpeakerTitle => &self.speaker_title,
            FormField::SpeakerBio => &self.speaker_bio,
            FormField::FormLink => &self.form_link,
        }
    }

    /// Whether every field is empty
    #[must_use]
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    /// The payload this form would submit, or `None` if a required field is
    /// missing
    ///
    /// The title must be non-empty and the date a real `YYYY-MM-DD` calendar
    /// date. A whitespace-only title is passed through; the backend rejects it. The form link is only included for admins, and only when one
    /// was typed.
    #[must_use]
    pub fn payload(&self, persona: Persona) -> Option<CampusEventPayload> {
        let date = self.date.trim();
        if self.title.is_empty() || NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
            return None;
        }

        let form_link = Some(self.form_link.trim())
            .filter(|link| persona.is_admin() && !link.is_empty())
            .map(str::to_string);

        Some(CampusEventPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            date: date.to_string(),
            speaker: Speaker {
                name: self.speaker_name.clone(),
                title: self.speaker_title.clone(),
                bio: self.speaker_bio.clone(),
            },
            form_link,
        })
    }

    /// Build the payload and clear the form
    ///
    /// Returns `None`, leaving every field unchanged, when the form is not
    /// submittable.
    pub fn submit(&mut self, persona: Persona) -> Option<CampusEventPayload> {
        let payload = self.payload(persona)?;
        *self = Self::default();
        Some(payload)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn filled() -> AddEventForm {
        let mut form = AddEventForm::default();
        form.set(FormField::Title, "Demo");
        form.set(FormField::Date, "2025-01-01");
        form.set(FormField::SpeakerName, "Ada");
        form.set(FormField::FormLink, "https://forms.gle/demo");
        form
    }

    #[test]
    fn test_submit_clears_the_form() {
        let mut form = filled();

        let payload = form.submit(Persona::Admin).unwrap();

        assert_eq!(payload.title, "Demo");
        assert_eq!(payload.speaker.name, "Ada");
        assert_eq!(payload.form_link.as_deref(), Some("https://forms.gle/demo"));
        assert!(form.is_blank());
    }

    #[test]
    fn test_user_submission_never_carries_form_link() {
        let mut form = filled();
        let payload = form.submit(Persona::User).unwrap();
        assert_eq!(payload.form_link, None);
    }

    #[test]
    fn test_blank_form_link_is_omitted_for_admins() {
        let mut form = filled();
        form.set(FormField::FormLink, "   ");
        assert_eq!(form.payload(Persona::Admin).unwrap().form_link, None);
    }

    #[test]
    fn test_invalid_date_is_suppressed() {
        let mut form = filled();
        form.set(FormField::Date, "2025-02-30");
        let before = form.clone();

        assert!(form.submit(Persona::Admin).is_none());
        assert_eq!(form, before);
    }

    #[test]
    fn test_whitespace_title_is_left_to_the_backend() {
        let mut form = filled();
        form.set(FormField::Title, "  ");

        let payload = form.submit(Persona::Admin).unwrap();
        assert_eq!(payload.title, "  ");
        assert!(form.is_blank());
    }

    #[test]
    fn test_get_reads_back_set() {
        let form = filled();
        assert_eq!(form.get(FormField::Title), "Demo");
        assert_eq!(form.get(FormField::SpeakerBio), "");
    }

    proptest! {
        #[test]
        fn prop_missing_required_field_changes_nothing(
            title in "[ ]{0,3}|[a-z]{1,8}",
            description in "[a-z ]{0,12}",
            blank_title in any::<bool>(),
        ) {
            let mut form = AddEventForm::default();
            form.set(FormField::Description, description);
            if blank_title {
                form.set(FormField::Title, "");
                form.set(FormField::Date, "2025-01-01");
            } else {
                form.set(FormField::Title, title);
                form.set(FormField::Date, "");
            }
            let before = form.clone();

            prop_assert!(form.submit(Persona::Admin).is_none());
            prop_assert_eq!(form, before);
        }

        #[test]
        fn prop_non_admin_payload_has_no_link(link in "[a-z:/.]{0,20}") {
            let mut form = AddEventForm::default();
            form.set(FormField::Title, "Demo");
            form.set(FormField::Date, "2025-01-01");
            form.set(FormField::FormLink, link);

            let payload = form.submit(Persona::User);
            prop_assert!(payload.is_some());
            prop_assert_eq!(payload.and_then(|p| p.form_link), None);
        }
    }
}
