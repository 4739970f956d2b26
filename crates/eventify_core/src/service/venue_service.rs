//! Venue operations.
//!
//! # Invariants
//! - Create checks name uniqueness before field validation.
//! - Retrieve checks existence before fetching.
//! - Update is strict (rejects absent ids) and re-validates every field, but
//!   does not re-check name uniqueness.
//! - Delete never inspects events that reference the venue.

use crate::model::venue::{Venue, VenueDraft, VenueId, VenueRecord};
use crate::model::EntityKind;
use crate::repo::venue_repo::VenueRepository;
use crate::service::error::{OperationError, OperationResult};
use crate::service::observe;
use crate::service::validation::{require_positive_id, validate_venue_draft};
use log::info;

/// Venue operations over a venue store.
pub struct VenueService<R: VenueRepository> {
    repo: R,
}

impl<R: VenueRepository> VenueService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a venue and returns it with its store-assigned id.
    ///
    /// # Errors
    /// - `Conflict` when a venue with the same name exists.
    /// - `Validation` when name, country, address, city, state or zipCode is
    ///   missing or empty.
    pub fn create_venue(&self, draft: &VenueDraft) -> OperationResult<Venue> {
        observe("venue_create", || {
            if let Some(name) = draft.name.as_deref() {
                if self.repo.venue_exists_by_name(name)? {
                    return Err(OperationError::Conflict {
                        entity: EntityKind::Venue,
                        field: "name",
                        value: name.to_string(),
                    });
                }
            }
            let record = validate_venue_draft(draft)?;

            let venue = self.repo.save_venue(&record)?;
            info!(
                "event=venue_create module=service status=ok venue_id={}",
                venue.id
            );
            Ok(venue)
        })
    }

    /// Gets one venue by id.
    pub fn get_venue(&self, id: VenueId) -> OperationResult<Venue> {
        observe("venue_get", || {
            let id = require_positive_id(EntityKind::Venue, id)?;
            self.ensure_exists(id)?;
            self.repo
                .get_venue(id)?
                .ok_or(OperationError::NotFound {
                    entity: EntityKind::Venue,
                    id,
                })
        })
    }

    /// Lists all venues in store order.
    pub fn list_venues(&self) -> OperationResult<Vec<Venue>> {
        observe("venue_list", || Ok(self.repo.list_venues()?))
    }

    /// Looks a venue up by its exact name.
    pub fn find_venue_by_name(&self, name: &str) -> OperationResult<Option<Venue>> {
        observe("venue_find_by_name", || Ok(self.repo.find_venue_by_name(name)?))
    }

    /// Replaces every field of an existing venue.
    ///
    /// # Errors
    /// - `InvalidIdentifier` for a non-positive id.
    /// - `NotFound` when the venue does not exist.
    /// - `Validation` under the same field rules as create.
    pub fn update_venue(&self, id: VenueId, draft: &VenueDraft) -> OperationResult<Venue> {
        observe("venue_update", || {
            let id = require_positive_id(EntityKind::Venue, id)?;
            self.ensure_exists(id)?;
            let record = VenueRecord {
                id: Some(id),
                ..validate_venue_draft(draft)?
            };

            let venue = self.repo.update_venue(id, &record)?;
            info!("event=venue_update module=service status=ok venue_id={id}");
            Ok(venue)
        })
    }

    /// Deletes a venue. Events referencing it are left to the event store.
    pub fn delete_venue(&self, id: VenueId) -> OperationResult<()> {
        observe("venue_delete", || {
            let id = require_positive_id(EntityKind::Venue, id)?;
            self.ensure_exists(id)?;

            self.repo.delete_venue(id)?;
            info!("event=venue_delete module=service status=ok venue_id={id}");
            Ok(())
        })
    }

    fn ensure_exists(&self, id: VenueId) -> OperationResult<()> {
        if !self.repo.venue_exists(id)? {
            return Err(OperationError::NotFound {
                entity: EntityKind::Venue,
                id,
            });
        }
        Ok(())
    }
}
