//! Admin portal event creation form
//!
//! Every field is kept as typed. [`EventDraft::normalize`] turns the draft
//! into a [`NewEvent`]: numbers are parsed and tags split on commas.

use eventhub_api::types::NewEvent;

/// Draft inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    /// Title
    Title,
    /// Description
    Description,
    /// Date, `YYYY-MM-DD`
    Date,
    /// Start time, `HH:MM`
    Time,
    /// Venue
    Location,
    /// Category
    Category,
    /// Capacity, parsed as an integer
    Capacity,
    /// Price, parsed as a decimal
    Price,
    /// Image URL
    Image,
    /// Organiser
    Organizer,
    /// Comma-separated tags
    Tags,
}

/// Raw event creation form contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Date as typed
    pub date: String,
    /// Time as typed
    pub time: String,
    /// Venue
    pub location: String,
    /// Category
    pub category: String,
    /// Capacity as typed
    pub capacity: String,
    /// Price as typed
    pub price: String,
    /// Image URL
    pub image: String,
    /// Organiser
    pub organizer: String,
    /// Tags as typed
    pub tags: String,
}

impl EventDraft {
    /// Replace one field
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        let slot = match field {
            DraftField::Title => &mut self.title,
            DraftField::Description => &mut self.description,
            DraftField::Date => &mut self.date,
            DraftField::Time => &mut self.time,
            DraftField::Location => &mut self.location,
            DraftField::Category => &mut self.category,
            DraftField::Capacity => &mut self.capacity,
            DraftField::Price => &mut self.price,
            DraftField::Image => &mut self.image,
            DraftField::Organizer => &mut self.organizer,
            DraftField::Tags => &mut self.tags,
        };
        *slot = value;
    }

    /// Payload for `POST /events`
    ///
    /// Capacity and price are read from the leading number of the input, so
    /// `100.0` is a capacity of 100 and `12abc` one of 12. Input with no
    /// leading number becomes `None` and is left for the backend to reject.
    /// Empty image and organiser fields are omitted.
    #[must_use]
    pub fn normalize(&self) -> NewEvent {
        NewEvent {
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
            location: self.location.clone(),
            category: self.category.clone(),
            capacity: leading_number(&self.capacity, false).and_then(|n| n.parse().ok()),
            price: leading_number(&self.price, true)
                .and_then(|n| n.parse::<f64>().ok())
                .filter(|price| price.is_finite()),
            image: non_empty(&self.image),
            organizer: non_empty(&self.organizer),
            tags: parse_tags(&self.tags),
        }
    }
}

/// The longest numeric prefix of `raw` after leading whitespace
///
/// An optional sign and digits, plus a fractional part when `fraction` is
/// set. Returns `None` when no digit is found.
fn leading_number(raw: &str, fraction: bool) -> Option<&str> {
    let raw = raw.trim_start();
    let bytes = raw.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut digits = 0;

    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
        digits += 1;
    }
    if fraction && bytes.get(end) == Some(&b'.') {
        let mut after = end + 1;
        while bytes.get(after).is_some_and(u8::is_ascii_digit) {
            after += 1;
            digits += 1;
        }
        if digits > 0 {
            end = after;
        }
    }

    (digits > 0).then(|| &raw[..end])
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Split comma-separated tags, trimming each and dropping empties
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}
