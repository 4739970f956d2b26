use eventify_core::db::open_db_in_memory;
use eventify_core::{
    EntityKind, EventDraft, EventService, InMemoryEventRepository, InMemoryVenueRepository,
    OperationError, SqliteEventRepository, SqliteVenueRepository, VenueDraft, VenueService,
};

#[test]
fn deleting_a_venue_leaves_events_with_their_snapshot_in_memory() {
    let venue_repo = InMemoryVenueRepository::new();
    let event_repo = InMemoryEventRepository::new();
    let venues = VenueService::new(&venue_repo);
    let events = EventService::new(&event_repo, &venue_repo);

    let hall_venue = venues.create_venue(&hall()).unwrap();
    let gala_event = events.create_event(&gala(hall_venue.id)).unwrap();

    venues.delete_venue(hall_venue.id).unwrap();

    let orphan = events.get_event(gala_event.id).unwrap();
    assert_eq!(orphan.venue, hall_venue);
    assert_eq!(events.list_events_by_venue(hall_venue.id).unwrap(), vec![orphan]);
    assert!(matches!(
        venues.get_venue(hall_venue.id).unwrap_err(),
        OperationError::NotFound {
            entity: EntityKind::Venue,
            ..
        }
    ));
}

#[test]
fn orphaned_event_cannot_be_rewritten_against_its_deleted_venue() {
    let venue_repo = InMemoryVenueRepository::new();
    let event_repo = InMemoryEventRepository::new();
    let venues = VenueService::new(&venue_repo);
    let events = EventService::new(&event_repo, &venue_repo);

    let hall_venue = venues.create_venue(&hall()).unwrap();
    let created = events.create_event(&gala(hall_venue.id)).unwrap();
    venues.delete_venue(hall_venue.id).unwrap();

    let err = events.update_event(created.id, &gala(hall_venue.id)).unwrap_err();
    assert!(matches!(
        err,
        OperationError::NotFound {
            entity: EntityKind::Venue,
            id
        } if id == hall_venue.id
    ));

    events.delete_event(created.id).unwrap();
    assert!(events.list_events().unwrap().is_empty());
}

#[test]
fn deleting_a_venue_purges_its_events_in_sqlite() {
    let conn = open_db_in_memory().unwrap();
    let venue_repo = SqliteVenueRepository::try_new(&conn).unwrap();
    let event_repo = SqliteEventRepository::try_new(&conn).unwrap();
    let venues = VenueService::new(&venue_repo);
    let events = EventService::new(&event_repo, &venue_repo);

    let hall_venue = venues.create_venue(&hall()).unwrap();
    let mut annex_draft = hall();
    annex_draft.name = Some("Annex".to_string());
    let annex = venues.create_venue(&annex_draft).unwrap();

    let gala_event = events.create_event(&gala(hall_venue.id)).unwrap();
    let mut fair_draft = gala(annex.id);
    fair_draft.title = Some("Fair".to_string());
    let fair = events.create_event(&fair_draft).unwrap();

    venues.delete_venue(hall_venue.id).unwrap();

    assert!(matches!(
        events.get_event(gala_event.id).unwrap_err(),
        OperationError::NotFound {
            entity: EntityKind::Event,
            ..
        }
    ));
    assert_eq!(events.list_events().unwrap(), vec![fair]);
}

#[test]
fn venue_update_is_visible_through_sqlite_events() {
    let conn = open_db_in_memory().unwrap();
    let venue_repo = SqliteVenueRepository::try_new(&conn).unwrap();
    let event_repo = SqliteEventRepository::try_new(&conn).unwrap();
    let venues = VenueService::new(&venue_repo);
    let events = EventService::new(&event_repo, &venue_repo);

    let hall_venue = venues.create_venue(&hall()).unwrap();
    let created = events.create_event(&gala(hall_venue.id)).unwrap();

    let mut renamed = hall();
    renamed.name = Some("Grand Hall".to_string());
    venues.update_venue(hall_venue.id, &renamed).unwrap();

    assert_eq!(events.get_event(created.id).unwrap().venue.name, "Grand Hall");
}

fn hall() -> VenueDraft {
    VenueDraft::new("Hall", "USA", "1 Main St", "Austin", "TX", "73301")
}

fn gala(venue_id: i64) -> EventDraft {
    EventDraft::new("Gala", "Charity dinner", "2025-06-01", "Red Cross", venue_id)
}
