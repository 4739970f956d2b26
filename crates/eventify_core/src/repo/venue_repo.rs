//! Venue store contract and SQLite implementation.
//!
//! # Invariants
//! - `venues.venue_name` carries a `UNIQUE` constraint.
//! - Lists are ordered by ascending id.
//! - `update_venue` is strict: it never inserts.

use crate::model::venue::{Venue, VenueId, VenueRecord};
use crate::model::EntityKind;
use crate::repo::{ensure_schema_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const VENUE_SELECT_SQL: &str = "SELECT
    id,
    venue_name,
    country,
    address,
    city,
    state,
    zip_code
FROM venues";

/// Persistence contract for venues.
pub trait VenueRepository {
    /// Inserts (`id = None`) or writes under the given id.
    fn save_venue(&self, venue: &VenueRecord) -> RepoResult<Venue>;
    fn get_venue(&self, id: VenueId) -> RepoResult<Option<Venue>>;
    fn list_venues(&self) -> RepoResult<Vec<Venue>>;
    fn find_venue_by_name(&self, name: &str) -> RepoResult<Option<Venue>>;
    fn venue_exists_by_name(&self, name: &str) -> RepoResult<bool>;
    fn venue_exists(&self, id: VenueId) -> RepoResult<bool>;
    /// Returns `NotFound` when no row was removed.
    fn delete_venue(&self, id: VenueId) -> RepoResult<()>;
    /// Replaces all fields of an existing venue; `venue.id` is ignored.
    fn update_venue(&self, id: VenueId, venue: &VenueRecord) -> RepoResult<Venue>;
}

impl<R: VenueRepository + ?Sized> VenueRepository for &R {
    fn save_venue(&self, venue: &VenueRecord) -> RepoResult<Venue> {
        (**self).save_venue(venue)
    }

    fn get_venue(&self, id: VenueId) -> RepoResult<Option<Venue>> {
        (**self).get_venue(id)
    }

    fn list_venues(&self) -> RepoResult<Vec<Venue>> {
        (**self).list_venues()
    }

    fn find_venue_by_name(&self, name: &str) -> RepoResult<Option<Venue>> {
        (**self).find_venue_by_name(name)
    }

    fn venue_exists_by_name(&self, name: &str) -> RepoResult<bool> {
        (**self).venue_exists_by_name(name)
    }

    fn venue_exists(&self, id: VenueId) -> RepoResult<bool> {
        (**self).venue_exists(id)
    }

    fn delete_venue(&self, id: VenueId) -> RepoResult<()> {
        (**self).delete_venue(id)
    }

    fn update_venue(&self, id: VenueId, venue: &VenueRecord) -> RepoResult<Venue> {
        (**self).update_venue(id, venue)
    }
}

/// SQLite-backed venue store.
pub struct SqliteVenueRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteVenueRepository<'conn> {
    /// Wraps a connection opened through `db::open_db*`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl VenueRepository for SqliteVenueRepository<'_> {
    fn save_venue(&self, venue: &VenueRecord) -> RepoResult<Venue> {
        self.conn.execute(
            "INSERT INTO venues (
                id,
                venue_name,
                country,
                address,
                city,
                state,
                zip_code
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(id) DO UPDATE SET
                venue_name = excluded.venue_name,
                country = excluded.country,
                address = excluded.address,
                city = excluded.city,
                state = excluded.state,
                zip_code = excluded.zip_code;",
            params![
                venue.id,
                venue.name.as_str(),
                venue.country.as_str(),
                venue.address.as_str(),
                venue.city.as_str(),
                venue.state.as_str(),
                venue.zip_code.as_str(),
            ],
        )?;

        let id = venue.id.unwrap_or_else(|| self.conn.last_insert_rowid());
        Ok(venue.clone().into_venue(id))
    }

    fn get_venue(&self, id: VenueId) -> RepoResult<Option<Venue>> {
        let venue = self
            .conn
            .query_row(
                &format!("{VENUE_SELECT_SQL} WHERE id = ?1;"),
                [id],
                |row| parse_venue_row(row, "id"),
            )
            .optional()?;
        Ok(venue)
    }

    fn list_venues(&self) -> RepoResult<Vec<Venue>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{VENUE_SELECT_SQL} ORDER BY id ASC;"))?;
        let venues = stmt
            .query_map([], |row| parse_venue_row(row, "id"))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(venues)
    }

    fn find_venue_by_name(&self, name: &str) -> RepoResult<Option<Venue>> {
        let venue = self
            .conn
            .query_row(
                &format!("{VENUE_SELECT_SQL} WHERE venue_name = ?1;"),
                [name],
                |row| parse_venue_row(row, "id"),
            )
            .optional()?;
        Ok(venue)
    }

    fn venue_exists_by_name(&self, name: &str) -> RepoResult<bool> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM venues WHERE venue_name = ?1);",
            [name],
            |row| row.get::<_, bool>(0),
        )?;
        Ok(exists)
    }

    fn venue_exists(&self, id: VenueId) -> RepoResult<bool> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM venues WHERE id = ?1);",
            [id],
            |row| row.get::<_, bool>(0),
        )?;
        Ok(exists)
    }

    fn delete_venue(&self, id: VenueId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM venues WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Venue,
                id,
            });
        }
        Ok(())
    }

    fn update_venue(&self, id: VenueId, venue: &VenueRecord) -> RepoResult<Venue> {
        let changed = self.conn.execute(
            "UPDATE venues
             SET
                venue_name = ?1,
                country = ?2,
                address = ?3,
                city = ?4,
                state = ?5,
                zip_code = ?6
             WHERE id = ?7;",
            params![
                venue.name.as_str(),
                venue.country.as_str(),
                venue.address.as_str(),
                venue.city.as_str(),
                venue.state.as_str(),
                venue.zip_code.as_str(),
                id,
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: EntityKind::Venue,
                id,
            });
        }
        Ok(venue.clone().into_venue(id))
    }
}

/// Maps venue columns; `id_column` differs when venues are joined.
pub(crate) fn parse_venue_row(row: &Row<'_>, id_column: &str) -> rusqlite::Result<Venue> {
    Ok(Venue {
        id: row.get(id_column)?,
        name: row.get("venue_name")?,
        country: row.get("country")?,
        address: row.get("address")?,
        city: row.get("city")?,
        state: row.get("state")?,
        zip_code: row.get("zip_code")?,
    })
}
