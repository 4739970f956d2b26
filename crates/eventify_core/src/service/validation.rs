//! Guard clauses shared by venue and event operations.
//!
//! Each guard returns the first violation it sees; callers run guards in a
//! fixed order so the reported error is deterministic.

use crate::model::event::EventDraft;
use crate::model::venue::{VenueDraft, VenueRecord};
use crate::model::EntityKind;
use crate::service::error::{OperationError, OperationResult};

/// Rejects ids that no store could have assigned.
pub(crate) fn require_positive_id(entity: EntityKind, id: i64) -> OperationResult<i64> {
    if id <= 0 {
        return Err(OperationError::InvalidIdentifier { entity, id });
    }
    Ok(id)
}

/// Requires a present, non-empty value. Whitespace counts as content.
pub(crate) fn require_text(
    entity: EntityKind,
    field: &'static str,
    value: Option<&str>,
) -> OperationResult<String> {
    match value {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(OperationError::Validation { entity, field }),
    }
}

/// Checks venue fields in order: name, country, address, city, state, zipCode.
pub(crate) fn validate_venue_draft(draft: &VenueDraft) -> OperationResult<VenueRecord> {
    let entity = EntityKind::Venue;
    Ok(VenueRecord {
        id: None,
        name: require_text(entity, "name", draft.name.as_deref())?,
        country: require_text(entity, "country", draft.country.as_deref())?,
        address: require_text(entity, "address", draft.address.as_deref())?,
        city: require_text(entity, "city", draft.city.as_deref())?,
        state: require_text(entity, "state", draft.state.as_deref())?,
        zip_code: require_text(entity, "zipCode", draft.zip_code.as_deref())?,
    })
}

/// Required event text fields, before the venue is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EventFields {
    pub title: String,
    pub description: String,
    pub date: String,
    pub hosted_by: String,
}

/// Checks event fields in order: title, description, date, hostedBy.
pub(crate) fn validate_event_fields(draft: &EventDraft) -> OperationResult<EventFields> {
    let entity = EntityKind::Event;
    Ok(EventFields {
        title: require_text(entity, "title", draft.title.as_deref())?,
        description: require_text(entity, "description", draft.description.as_deref())?,
        date: require_text(entity, "date", draft.date.as_deref())?,
        hosted_by: require_text(entity, "hostedBy", draft.hosted_by.as_deref())?,
    })
}

#[cfg(test)]
mod tests {
    use super::{require_positive_id, require_text, validate_event_fields, validate_venue_draft};
    use crate::model::event::EventDraft;
    use crate::model::venue::VenueDraft;
    use crate::model::EntityKind;
    use crate::service::error::OperationError;

    #[test]
    fn positive_ids_pass_and_others_fail() {
        assert_eq!(require_positive_id(EntityKind::Event, 1).unwrap(), 1);
        for id in [0, -1, i64::MIN] {
            let err = require_positive_id(EntityKind::Event, id).unwrap_err();
            assert!(matches!(err, OperationError::InvalidIdentifier { id: got, .. } if got == id));
        }
    }

    #[test]
    fn missing_and_empty_text_fail_alike() {
        let missing = require_text(EntityKind::Venue, "city", None).unwrap_err();
        let empty = require_text(EntityKind::Venue, "city", Some("")).unwrap_err();
        assert_eq!(missing.to_string(), empty.to_string());
    }

    #[test]
    fn whitespace_counts_as_present() {
        assert_eq!(
            require_text(EntityKind::Venue, "city", Some("  ")).unwrap(),
            "  "
        );
    }

    #[test]
    fn venue_fields_report_first_violation() {
        let draft = VenueDraft {
            name: Some("Arena".to_string()),
            country: None,
            address: None,
            city: None,
            state: None,
            zip_code: None,
        };
        let err = validate_venue_draft(&draft).unwrap_err();
        assert!(matches!(
            err,
            OperationError::Validation {
                field: "country",
                ..
            }
        ));
    }

    #[test]
    fn venue_state_is_required() {
        let mut draft = VenueDraft::new("Arena", "USA", "1 Main", "Austin", "TX", "73301");
        draft.state = Some(String::new());
        let err = validate_venue_draft(&draft).unwrap_err();
        assert!(matches!(err, OperationError::Validation { field: "state", .. }));
    }

    #[test]
    fn event_fields_ignore_venue_hour_and_price() {
        let mut draft = EventDraft::new("Gig", "Live", "2025-05-01", "Promoter", 1);
        draft.venue_id = None;
        let fields = validate_event_fields(&draft).unwrap();
        assert_eq!(fields.title, "Gig");
        assert_eq!(fields.hosted_by, "Promoter");
    }

    #[test]
    fn event_description_checked_before_date() {
        let draft = EventDraft {
            title: Some("Gig".to_string()),
            ..EventDraft::default()
        };
        let err = validate_event_fields(&draft).unwrap_err();
        assert!(matches!(
            err,
            OperationError::Validation {
                field: "description",
                ..
            }
        ));
    }
}
