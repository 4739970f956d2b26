//! Core domain logic for Eventify venues and events.
//! This crate is the single source of truth for validation, uniqueness and
//! referential-integrity rules; transports and storage plug in around it.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError, LoggingStatus};
pub use model::event::{Event, EventDraft, EventId, EventRecord};
pub use model::venue::{Venue, VenueDraft, VenueId, VenueRecord};
pub use model::EntityKind;
pub use repo::event_repo::{EventRepository, SqliteEventRepository};
pub use repo::memory::{InMemoryEventRepository, InMemoryVenueRepository};
pub use repo::venue_repo::{SqliteVenueRepository, VenueRepository};
pub use repo::{RepoError, RepoResult};
pub use service::error::{ErrorKind, OperationError, OperationResult};
pub use service::event_service::EventService;
pub use service::venue_service::VenueService;

/// Minimal health-check API for adapter wiring.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
