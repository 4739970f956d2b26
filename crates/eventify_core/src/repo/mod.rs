//! Store abstractions and their implementations.
//!
//! # Responsibility
//! - Define the narrow venue/event store contracts operations depend on.
//! - Provide the SQLite store and the in-memory store.
//!
//! # Invariants
//! - Stores never validate business fields; operations do.
//! - Absence on mutation is reported as `RepoError::NotFound`, every other
//!   failure as a transport/data error.

use crate::db::migrations::{latest_version, schema_version};
use crate::db::DbError;
use crate::model::EntityKind;
use rusqlite::{Connection, ErrorCode};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod event_repo;
pub mod memory;
pub mod venue_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Store-level failure.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Mutation targeted a row that does not exist.
    NotFound { entity: EntityKind, id: i64 },
    /// Store-side constraint rejected the write (unique, foreign key).
    Constraint(String),
    /// Persisted data cannot be mapped back into the model.
    InvalidData(String),
    /// In-memory store lock was poisoned by a panicking writer.
    Poisoned(EntityKind),
    /// Connection schema is not at the version this binary writes.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found in store: {id}"),
            Self::Constraint(message) => write!(f, "store constraint violated: {message}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::Poisoned(entity) => write!(f, "{entity} store lock poisoned"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "store requires schema version {expected_version}, got {actual_version}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(err, message)
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Self::Constraint(message.unwrap_or_else(|| err.to_string()))
            }
            other => Self::Db(DbError::Sqlite(other)),
        }
    }
}

/// Rejects connections that were not opened through `db::open_db*`.
pub(crate) fn ensure_schema_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = schema_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }
    Ok(())
}
