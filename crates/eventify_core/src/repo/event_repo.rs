//! Event store contract and SQLite implementation.
//!
//! # Invariants
//! - Reads join `venues`, so every returned event carries its venue row.
//! - `events.event_title` carries a `UNIQUE` constraint.
//! - `events.venue_id` cascades on venue delete: this store purges events
//!   whose venue disappears.
//! - `save_event` with an id is an upsert.

use crate::model::event::{Event, EventId, EventRecord};
use crate::model::venue::VenueId;
use crate::model::EntityKind;
use crate::repo::venue_repo::parse_venue_row;
use crate::repo::{ensure_schema_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Params, Row};

const EVENT_SELECT_SQL: &str = "SELECT
    e.id AS event_id,
    e.event_title,
    e.description,
    e.date,
    e.event_hour,
    e.price,
    e.hoster,
    v.id AS venue_id,
    v.venue_name,
    v.country,
    v.address,
    v.city,
    v.state,
    v.zip_code
FROM events e
JOIN venues v ON v.id = e.venue_id";

/// Persistence contract for events.
pub trait EventRepository {
    /// Inserts (`id = None`) or upserts under the given id.
    fn save_event(&self, event: &EventRecord) -> RepoResult<Event>;
    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>>;
    fn list_events(&self) -> RepoResult<Vec<Event>>;
    fn list_events_by_title(&self, title: &str) -> RepoResult<Vec<Event>>;
    fn list_events_by_venue(&self, venue_id: VenueId) -> RepoResult<Vec<Event>>;
    fn list_events_by_host(&self, hosted_by: &str) -> RepoResult<Vec<Event>>;
    fn event_exists_by_title(&self, title: &str) -> RepoResult<bool>;
    fn event_exists(&self, id: EventId) -> RepoResult<bool>;
    /// Returns `NotFound` when no row was removed.
    fn delete_event(&self, id: EventId) -> RepoResult<()>;
}

impl<R: EventRepository + ?Sized> EventRepository for &R {
    fn save_event(&self, event: &EventRecord) -> RepoResult<Event> {
        (**self).save_event(event)
    }

    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>> {
        (**self).get_event(id)
    }

    fn list_events(&self) -> RepoResult<Vec<Event>> {
        (**self).list_events()
    }

    fn list_events_by_title(&self, title: &str) -> RepoResult<Vec<Event>> {
        (**self).list_events_by_title(title)
    }

    fn list_events_by_venue(&self, venue_id: VenueId) -> RepoResult<Vec<Event>> {
        (**self).list_events_by_venue(venue_id)
    }

    fn list_events_by_host(&self, hosted_by: &str) -> RepoResult<Vec<Event>> {
        (**self).list_events_by_host(hosted_by)
    }

    fn event_exists_by_title(&self, title: &str) -> RepoResult<bool> {
        (**self).event_exists_by_title(title)
    }

    fn event_exists(&self, id: EventId) -> RepoResult<bool> {
        (**self).event_exists(id)
    }

    fn delete_event(&self, id: EventId) -> RepoResult<()> {
        (**self).delete_event(id)
    }
}

/// SQLite-backed event store.
pub struct SqliteEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    /// Wraps a connection opened through `db::open_db*`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }

    fn query_events<P: Params>(&self, filter: &str, params: P) -> RepoResult<Vec<Event>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} {filter} ORDER BY e.id ASC;"))?;
        let events = stmt
            .query_map(params, parse_event_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(events)
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn save_event(&self, event: &EventRecord) -> RepoResult<Event> {
        self.conn.execute(
            "INSERT INTO events (
                id,
                event_title,
                description,
                venue_id,
                date,
                event_hour,
                price,
                hoster
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(id) DO UPDATE SET
                event_title = excluded.event_title,
                description = excluded.description,
                venue_id = excluded.venue_id,
                date = excluded.date,
                event_hour = excluded.event_hour,
                price = excluded.price,
                hoster = excluded.hoster;",
            params![
                event.id,
                event.title.as_str(),
                event.description.as_str(),
                event.venue.id,
                event.date.as_str(),
                event.hour,
                event.price,
                event.hosted_by.as_str(),
            ],
        )?;

        let id = event.id.unwrap_or_else(|| self.conn.last_insert_rowid());
        Ok(event.clone().into_event(id))
    }

    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>> {
        let event = self
            .conn
            .query_row(
                &format!("{EVENT_SELECT_SQL} WHERE e.id = ?1;"),
                [id],
                parse_event_row,
            )
            .optional()?;
        Ok(event)
    }

    fn list_events(&self) -> RepoResult<Vec<Event>> {
        self.query_events("", [])
    }

    fn list_events_by_title(&self, title: &str) -> RepoResult<Vec<Event>> {
        self.query_events("WHERE e.event_title = ?1", [title])
    }

    fn list_events_by_venue(&self, venue_id: VenueId) -> RepoResult<Vec<Event>> {
        self.query_events("WHERE e.venue_id = ?1", [venue_id])
    }

    fn list_events_by_host(&self, hosted_by: &str) -> RepoResult<Vec<Event>> {
        self.query_events("WHERE e.hoster = ?1", [hosted_by])
    }

    fn event_exists_by_title(&self, title: &str) -> RepoResult<bool> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM events WHERE event_title = ?1);",
            [title],
            |row| row.get::<_, bool>(0),
        )?;
        Ok(exists)
    }

    fn event_exists(&self, id: EventId) -> RepoResult<bool> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM events WHERE id = ?1);",
            [id],
            |row| row.get::<_, bool>(0),
        )?;
        Ok(exists)
    }

    fn delete_event(&self, id: EventId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM events WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Event,
                id,
            });
        }
        Ok(())
    }
}

fn parse_event_row(row: &Row<'_>) -> rusqlite::Result<Event> {
    Ok(Event {
        id: row.get("event_id")?,
        title: row.get("event_title")?,
        description: row.get("description")?,
        date: row.get("date")?,
        venue: parse_venue_row(row, "venue_id")?,
        hour: row.get("event_hour")?,
        price: row.get("price")?,
        hosted_by: row.get("hoster")?,
    })
}
