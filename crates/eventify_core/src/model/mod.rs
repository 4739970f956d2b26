//! Domain model for venues and the events hosted at them.
//!
//! # Responsibility
//! - Define persisted records (`Venue`, `Event`) returned by operations.
//! - Define caller drafts (`VenueDraft`, `EventDraft`) and validated write
//!   records (`VenueRecord`, `EventRecord`) handed to stores.
//!
//! # Invariants
//! - Identifiers are assigned by stores and are positive.
//! - An `Event` always embeds the full `Venue` it was resolved to.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub mod event;
pub mod venue;

/// Entity family named by errors and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Event,
    Venue,
}

impl EntityKind {
    /// Lowercase label used in messages and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Venue => "venue",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
