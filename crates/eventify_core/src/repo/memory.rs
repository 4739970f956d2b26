//! In-memory venue/event stores.
//!
//! # Responsibility
//! - Provide process-local stores for tests and embedding without SQLite.
//! - Count store calls so callers can prove an operation never reached storage.
//!
//! # Invariants
//! - Ids start at 1, grow monotonically and are never reused.
//! - No uniqueness constraint is enforced on venue names or event titles.
//! - Events keep the venue snapshot they were saved with; deleting a venue
//!   leaves its events untouched.

use crate::model::event::{Event, EventId, EventRecord};
use crate::model::venue::{Venue, VenueId, VenueRecord};
use crate::model::EntityKind;
use crate::repo::event_repo::EventRepository;
use crate::repo::venue_repo::VenueRepository;
use crate::repo::{RepoError, RepoResult};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn assign_id(&mut self, entity: EntityKind, requested: Option<i64>) -> RepoResult<i64> {
        match requested {
            Some(id) => {
                self.last_id = self.last_id.max(id);
                Ok(id)
            }
            None => {
                self.last_id = self.last_id.checked_add(1).ok_or_else(|| {
                    RepoError::Constraint(format!("{entity} id space exhausted"))
                })?;
                Ok(self.last_id)
            }
        }
    }

    fn remove(&mut self, entity: EntityKind, id: i64) -> RepoResult<()> {
        self.rows
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound { entity, id })
    }
}

#[derive(Debug)]
struct Store<T> {
    entity: EntityKind,
    table: Mutex<Table<T>>,
    calls: AtomicUsize,
}

impl<T> Store<T> {
    fn new(entity: EntityKind) -> Self {
        Self {
            entity,
            table: Mutex::new(Table::default()),
            calls: AtomicUsize::new(0),
        }
    }

    fn lock(&self) -> RepoResult<MutexGuard<'_, Table<T>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.table.lock().map_err(|_| RepoError::Poisoned(self.entity))
    }

    fn access_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Process-local venue store.
#[derive(Debug)]
pub struct InMemoryVenueRepository {
    store: Store<Venue>,
}

impl Default for InMemoryVenueRepository {
    fn default() -> Self {
        Self {
            store: Store::new(EntityKind::Venue),
        }
    }
}

impl InMemoryVenueRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of trait calls served so far.
    pub fn access_count(&self) -> usize {
        self.store.access_count()
    }
}

impl VenueRepository for InMemoryVenueRepository {
    fn save_venue(&self, venue: &VenueRecord) -> RepoResult<Venue> {
        let mut table = self.store.lock()?;
        let id = table.assign_id(EntityKind::Venue, venue.id)?;
        let saved = venue.clone().into_venue(id);
        table.rows.insert(id, saved.clone());
        Ok(saved)
    }

    fn get_venue(&self, id: VenueId) -> RepoResult<Option<Venue>> {
        Ok(self.store.lock()?.rows.get(&id).cloned())
    }

    fn list_venues(&self) -> RepoResult<Vec<Venue>> {
        Ok(self.store.lock()?.rows.values().cloned().collect())
    }

    fn find_venue_by_name(&self, name: &str) -> RepoResult<Option<Venue>> {
        let table = self.store.lock()?;
        Ok(table.rows.values().find(|venue| venue.name == name).cloned())
    }

    fn venue_exists_by_name(&self, name: &str) -> RepoResult<bool> {
        let table = self.store.lock()?;
        Ok(table.rows.values().any(|venue| venue.name == name))
    }

    fn venue_exists(&self, id: VenueId) -> RepoResult<bool> {
        Ok(self.store.lock()?.rows.contains_key(&id))
    }

    fn delete_venue(&self, id: VenueId) -> RepoResult<()> {
        self.store.lock()?.remove(EntityKind::Venue, id)
    }

    fn update_venue(&self, id: VenueId, venue: &VenueRecord) -> RepoResult<Venue> {
        let mut table = self.store.lock()?;
        let slot = table.rows.get_mut(&id).ok_or(RepoError::NotFound {
            entity: EntityKind::Venue,
            id,
        })?;
        *slot = venue.clone().into_venue(id);
        Ok(slot.clone())
    }
}

/// Process-local event store.
#[derive(Debug)]
pub struct InMemoryEventRepository {
    store: Store<Event>,
}

impl Default for InMemoryEventRepository {
    fn default() -> Self {
        Self {
            store: Store::new(EntityKind::Event),
        }
    }
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of trait calls served so far.
    pub fn access_count(&self) -> usize {
        self.store.access_count()
    }

    fn filter<F>(&self, predicate: F) -> RepoResult<Vec<Event>>
    where
        F: Fn(&Event) -> bool,
    {
        let table = self.store.lock()?;
        Ok(table
            .rows
            .values()
            .filter(|event| predicate(event))
            .cloned()
            .collect())
    }
}

impl EventRepository for InMemoryEventRepository {
    fn save_event(&self, event: &EventRecord) -> RepoResult<Event> {
        let mut table = self.store.lock()?;
        let id = table.assign_id(EntityKind::Event, event.id)?;
        let saved = event.clone().into_event(id);
        table.rows.insert(id, saved.clone());
        Ok(saved)
    }

    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>> {
        Ok(self.store.lock()?.rows.get(&id).cloned())
    }

    fn list_events(&self) -> RepoResult<Vec<Event>> {
        self.filter(|_| true)
    }

    fn list_events_by_title(&self, title: &str) -> RepoResult<Vec<Event>> {
        self.filter(|event| event.title == title)
    }

    fn list_events_by_venue(&self, venue_id: VenueId) -> RepoResult<Vec<Event>> {
        self.filter(|event| event.venue.id == venue_id)
    }

    fn list_events_by_host(&self, hosted_by: &str) -> RepoResult<Vec<Event>> {
        self.filter(|event| event.hosted_by == hosted_by)
    }

    fn event_exists_by_title(&self, title: &str) -> RepoResult<bool> {
        let table = self.store.lock()?;
        Ok(table.rows.values().any(|event| event.title == title))
    }

    fn event_exists(&self, id: EventId) -> RepoResult<bool> {
        Ok(self.store.lock()?.rows.contains_key(&id))
    }

    fn delete_event(&self, id: EventId) -> RepoResult<()> {
        self.store.lock()?.remove(EntityKind::Event, id)
    }
}
