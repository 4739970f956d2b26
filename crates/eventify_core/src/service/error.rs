//! Error taxonomy surfaced by venue/event operations.

use crate::model::EntityKind;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type OperationResult<T> = Result<T, OperationError>;

/// Coarse error family, for adapters that map failures to status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    InvalidIdentifier,
    Conflict,
    NotFound,
    Store,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::InvalidIdentifier => "invalid_identifier",
            Self::Conflict => "conflict",
            Self::NotFound => "not_found",
            Self::Store => "store",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single operation. The first violated guard wins.
#[derive(Debug)]
pub enum OperationError {
    /// A required field is missing or empty.
    Validation {
        entity: EntityKind,
        field: &'static str,
    },
    /// An event carries no venue reference.
    MissingVenue,
    /// An id argument is zero or negative.
    InvalidIdentifier { entity: EntityKind, id: i64 },
    /// A uniqueness rule on `field` is violated by `value`.
    Conflict {
        entity: EntityKind,
        field: &'static str,
        value: String,
    },
    /// The addressed or referenced entity does not exist.
    NotFound { entity: EntityKind, id: i64 },
    /// Opaque store failure, distinct from absence.
    Repo(RepoError),
}

impl OperationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } | Self::MissingVenue => ErrorKind::Validation,
            Self::InvalidIdentifier { .. } => ErrorKind::InvalidIdentifier,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Repo(_) => ErrorKind::Store,
        }
    }

    /// Entity named by the error, when the error is about one.
    pub fn entity(&self) -> Option<EntityKind> {
        match self {
            Self::Validation { entity, .. }
            | Self::InvalidIdentifier { entity, .. }
            | Self::Conflict { entity, .. }
            | Self::NotFound { entity, .. } => Some(*entity),
            Self::MissingVenue => Some(EntityKind::Event),
            Self::Repo(_) => None,
        }
    }
}

impl Display for OperationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingVenue => write!(f, "event must have an associated venue"),
            Self::Validation { entity, field } => {
                write!(f, "{entity} {field} cannot be null or empty")
            }
            Self::InvalidIdentifier { entity, id } => write!(f, "invalid {entity} id: {id}"),
            Self::Conflict {
                entity,
                field,
                value,
            } => write!(f, "{entity} with {field} `{value}` already exists"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found with id: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for OperationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for OperationError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            other => Self::Repo(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, OperationError};
    use crate::model::EntityKind;
    use crate::repo::RepoError;

    #[test]
    fn store_not_found_becomes_operation_not_found() {
        let err: OperationError = RepoError::NotFound {
            entity: EntityKind::Event,
            id: 9,
        }
        .into();
        assert!(matches!(
            err,
            OperationError::NotFound {
                entity: EntityKind::Event,
                id: 9
            }
        ));
    }

    #[test]
    fn other_store_failures_stay_opaque() {
        let err: OperationError = RepoError::Constraint("UNIQUE".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::Store);
        assert!(err.entity().is_none());
    }

    #[test]
    fn messages_name_entity_and_value() {
        let conflict = OperationError::Conflict {
            entity: EntityKind::Venue,
            field: "name",
            value: "Arena".to_string(),
        };
        assert_eq!(conflict.to_string(), "venue with name `Arena` already exists");

        let missing_venue = OperationError::MissingVenue;
        assert_eq!(
            missing_venue.to_string(),
            "event must have an associated venue"
        );
        assert_eq!(missing_venue.kind(), ErrorKind::Validation);
        assert_eq!(missing_venue.entity(), Some(EntityKind::Event));

        let empty_title = OperationError::Validation {
            entity: EntityKind::Event,
            field: "title",
        };
        assert_eq!(empty_title.to_string(), "event title cannot be null or empty");
    }
}
