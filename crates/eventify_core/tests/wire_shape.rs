use chrono::NaiveTime;
use eventify_core::{Event, EventDraft, Venue, VenueDraft};
use serde_json::json;

fn venue() -> Venue {
    Venue {
        id: 1,
        name: "Madison Square Garden".to_string(),
        country: "USA".to_string(),
        address: "4 Pennsylvania Plaza".to_string(),
        city: "New York".to_string(),
        state: "NY".to_string(),
        zip_code: "10001".to_string(),
    }
}

#[test]
fn venue_serializes_with_camel_case_keys() {
    let value = serde_json::to_value(venue()).unwrap();
    assert_eq!(value["zipCode"], "10001");
    assert!(value.get("zip_code").is_none());
}

#[test]
fn event_embeds_full_venue_and_time_of_day() {
    let event = Event {
        id: 3,
        title: "Concert".to_string(),
        description: "Live music".to_string(),
        date: "2025-12-15".to_string(),
        venue: venue(),
        hour: NaiveTime::from_hms_opt(20, 0, 0),
        price: Some(550.0),
        hosted_by: "Live Nation".to_string(),
    };

    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["hostedBy"], "Live Nation");
    assert_eq!(value["hour"], "20:00:00");
    assert_eq!(value["venue"]["name"], "Madison Square Garden");

    let back: Event = serde_json::from_value(value).unwrap();
    assert_eq!(back, event);
}

#[test]
fn partial_event_draft_leaves_missing_fields_empty() {
    let draft: EventDraft = serde_json::from_value(json!({
        "title": "Concert",
        "venueId": 1,
        "hour": "20:00:00",
        "price": 550.0
    }))
    .unwrap();

    assert_eq!(draft.title.as_deref(), Some("Concert"));
    assert_eq!(draft.venue_id, Some(1));
    assert_eq!(draft.hour, NaiveTime::from_hms_opt(20, 0, 0));
    assert!(draft.description.is_none());
    assert!(draft.hosted_by.is_none());
}

#[test]
fn empty_venue_draft_deserializes() {
    let draft: VenueDraft = serde_json::from_value(json!({ "zipCode": "" })).unwrap();
    assert_eq!(draft.zip_code.as_deref(), Some(""));
    assert!(draft.name.is_none());
}
