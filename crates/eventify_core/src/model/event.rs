//! Event domain model.
//!
//! # Responsibility
//! - Define the persisted event shape, which embeds its resolved venue.
//! - Define the draft accepted from callers and the validated write record.
//!
//! # Invariants
//! - `title` is unique across all events at create time.
//! - `venue` is the full record loaded from the venue store, never caller data.
//! - `date` is an opaque calendar-date string; core does not parse it.

use crate::model::venue::{Venue, VenueId};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Store-assigned event identifier.
pub type EventId = i64;

/// Persisted event with its resolved venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    /// Opaque calendar date, e.g. `2025-12-15`.
    pub date: String,
    pub venue: Venue,
    pub hour: Option<NaiveTime>,
    pub price: Option<f64>,
    pub hosted_by: String,
}

/// Caller input for event create/update.
///
/// The venue is referenced by id only; the operation resolves it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub venue_id: Option<VenueId>,
    pub hour: Option<NaiveTime>,
    pub price: Option<f64>,
    pub hosted_by: Option<String>,
}

impl EventDraft {
    /// Builds a draft with all required fields present and no hour/price.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        date: impl Into<String>,
        hosted_by: impl Into<String>,
        venue_id: VenueId,
    ) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            date: Some(date.into()),
            venue_id: Some(venue_id),
            hour: None,
            price: None,
            hosted_by: Some(hosted_by.into()),
        }
    }
}

/// Validated event handed to a store.
///
/// `id = None` inserts with a store-assigned id; `Some(id)` writes under that id.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub id: Option<EventId>,
    pub title: String,
    pub description: String,
    pub date: String,
    pub venue: Venue,
    pub hour: Option<NaiveTime>,
    pub price: Option<f64>,
    pub hosted_by: String,
}

impl EventRecord {
    /// Attaches the identifier chosen by the store.
    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            date: self.date,
            venue: self.venue,
            hour: self.hour,
            price: self.price,
            hosted_by: self.hosted_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EventDraft, EventRecord};
    use crate::model::venue::Venue;
    use chrono::NaiveTime;

    fn venue() -> Venue {
        Venue {
            id: 7,
            name: "Hall".to_string(),
            country: "USA".to_string(),
            address: "1 Main St".to_string(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
            zip_code: "73301".to_string(),
        }
    }

    #[test]
    fn into_event_keeps_fields_and_sets_id() {
        let record = EventRecord {
            id: None,
            title: "Launch".to_string(),
            description: "Product launch".to_string(),
            date: "2025-01-01".to_string(),
            venue: venue(),
            hour: NaiveTime::from_hms_opt(20, 0, 0),
            price: Some(12.5),
            hosted_by: "Acme".to_string(),
        };

        let event = record.into_event(3);
        assert_eq!(event.id, 3);
        assert_eq!(event.venue.id, 7);
        assert_eq!(event.price, Some(12.5));
    }

    #[test]
    fn draft_new_leaves_optional_fields_empty() {
        let draft = EventDraft::new("t", "d", "2025-01-01", "h", 1);
        assert_eq!(draft.venue_id, Some(1));
        assert!(draft.hour.is_none());
        assert!(draft.price.is_none());
    }
}
