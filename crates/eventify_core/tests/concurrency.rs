use eventify_core::db::open_db_in_memory;
use eventify_core::{
    Event, EventDraft, EventId, EventRecord, EventRepository, EventService,
    InMemoryEventRepository, InMemoryVenueRepository, RepoError, RepoResult,
    SqliteEventRepository, SqliteVenueRepository, VenueDraft, VenueId, VenueService,
};
use std::sync::Barrier;

/// Holds every title lookup until `parties` callers have passed it.
struct GatedEvents<'a> {
    inner: &'a InMemoryEventRepository,
    gate: Barrier,
}

impl EventRepository for GatedEvents<'_> {
    fn save_event(&self, event: &EventRecord) -> RepoResult<Event> {
        self.inner.save_event(event)
    }

    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>> {
        self.inner.get_event(id)
    }

    fn list_events(&self) -> RepoResult<Vec<Event>> {
        self.inner.list_events()
    }

    fn list_events_by_title(&self, title: &str) -> RepoResult<Vec<Event>> {
        self.inner.list_events_by_title(title)
    }

    fn list_events_by_venue(&self, venue_id: VenueId) -> RepoResult<Vec<Event>> {
        self.inner.list_events_by_venue(venue_id)
    }

    fn list_events_by_host(&self, hosted_by: &str) -> RepoResult<Vec<Event>> {
        self.inner.list_events_by_host(hosted_by)
    }

    fn event_exists_by_title(&self, title: &str) -> RepoResult<bool> {
        let exists = self.inner.event_exists_by_title(title)?;
        self.gate.wait();
        Ok(exists)
    }

    fn event_exists(&self, id: EventId) -> RepoResult<bool> {
        self.inner.event_exists(id)
    }

    fn delete_event(&self, id: EventId) -> RepoResult<()> {
        self.inner.delete_event(id)
    }
}

#[test]
fn concurrent_creates_can_both_pass_the_title_check() {
    let venue_repo = InMemoryVenueRepository::new();
    let venue = VenueService::new(&venue_repo).create_venue(&hall()).unwrap();

    let inner = InMemoryEventRepository::new();
    let gated = GatedEvents {
        inner: &inner,
        gate: Barrier::new(2),
    };
    let events = EventService::new(&gated, &venue_repo);
    let draft = EventDraft::new("Gala", "Charity dinner", "2025-06-01", "Red Cross", venue.id);

    let outcomes = std::thread::scope(|scope| {
        let first = scope.spawn(|| events.create_event(&draft));
        let second = scope.spawn(|| events.create_event(&draft));
        [first.join().unwrap(), second.join().unwrap()]
    });

    assert!(outcomes.iter().all(Result::is_ok));
    let duplicates = inner.list_events_by_title("Gala").unwrap();
    assert_eq!(duplicates.len(), 2);
    assert_ne!(duplicates[0].id, duplicates[1].id);
}

#[test]
fn sqlite_store_rejects_duplicate_title_that_bypassed_the_check() {
    let conn = open_db_in_memory().unwrap();
    let venue_repo = SqliteVenueRepository::try_new(&conn).unwrap();
    let event_repo = SqliteEventRepository::try_new(&conn).unwrap();
    let venue = VenueService::new(&venue_repo).create_venue(&hall()).unwrap();

    let record = EventRecord {
        id: None,
        title: "Gala".to_string(),
        description: "Charity dinner".to_string(),
        date: "2025-06-01".to_string(),
        venue,
        hour: None,
        price: None,
        hosted_by: "Red Cross".to_string(),
    };
    event_repo.save_event(&record).unwrap();

    let err = event_repo.save_event(&record).unwrap_err();
    assert!(matches!(err, RepoError::Constraint(_)));
    assert_eq!(event_repo.list_events().unwrap().len(), 1);
}

fn hall() -> VenueDraft {
    VenueDraft::new("Hall", "USA", "1 Main St", "Austin", "TX", "73301")
}
