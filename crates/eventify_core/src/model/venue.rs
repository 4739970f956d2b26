//! Venue domain model.
//!
//! # Responsibility
//! - Define the persisted venue shape and its write/draft counterparts.
//!
//! # Invariants
//! - `name` is unique across all venues (enforced by operations, and by the
//!   SQLite store as a second line).
//! - `id` never changes after the store assigns it.

use serde::{Deserialize, Serialize};

/// Store-assigned venue identifier.
pub type VenueId = i64;

/// Persisted venue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub id: VenueId,
    /// Globally unique display name.
    pub name: String,
    pub country: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

/// Caller input for venue create/update.
///
/// Every field is optional so a missing value and an empty value can both be
/// reported as validation failures instead of being rejected by the type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VenueDraft {
    pub name: Option<String>,
    pub country: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

impl VenueDraft {
    /// Builds a draft with every field present.
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip_code: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            country: Some(country.into()),
            address: Some(address.into()),
            city: Some(city.into()),
            state: Some(state.into()),
            zip_code: Some(zip_code.into()),
        }
    }
}

/// Validated venue handed to a store.
///
/// `id = None` asks the store to assign one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueRecord {
    pub id: Option<VenueId>,
    pub name: String,
    pub country: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl VenueRecord {
    /// Attaches the identifier chosen by the store.
    pub fn into_venue(self, id: VenueId) -> Venue {
        Venue {
            id,
            name: self.name,
            country: self.country,
            address: self.address,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
        }
    }
}
