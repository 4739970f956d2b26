//! Event operations.
//!
//! # Invariants
//! - Create checks title uniqueness first, then fields, then the venue
//!   reference, then resolves the venue.
//! - The persisted venue is always the record loaded from the venue store.
//! - Update does not re-check title uniqueness and does not check that the
//!   event exists; the store decides (both bundled stores upsert).
//! - Delete requires the event to exist.

use crate::model::event::{Event, EventDraft, EventId, EventRecord};
use crate::model::venue::{Venue, VenueId};
use crate::model::EntityKind;
use crate::repo::event_repo::EventRepository;
use crate::repo::venue_repo::VenueRepository;
use crate::service::error::{OperationError, OperationResult};
use crate::service::observe;
use crate::service::validation::{require_positive_id, validate_event_fields, EventFields};
use log::info;

/// Event operations over an event store, resolving venues through a venue store.
pub struct EventService<E: EventRepository, V: VenueRepository> {
    events: E,
    venues: V,
}

impl<E: EventRepository, V: VenueRepository> EventService<E, V> {
    pub fn new(events: E, venues: V) -> Self {
        Self { events, venues }
    }

    /// Creates an event at an existing venue.
    ///
    /// # Errors
    /// - `Conflict` when an event with the same title exists, regardless of
    ///   any other field.
    /// - `Validation` when title, description, date or hostedBy is missing or
    ///   empty, or when no venue reference is given.
    /// - `NotFound` when the referenced venue does not exist.
    pub fn create_event(&self, draft: &EventDraft) -> OperationResult<Event> {
        observe("event_create", || {
            if let Some(title) = draft.title.as_deref() {
                if self.events.event_exists_by_title(title)? {
                    return Err(OperationError::Conflict {
                        entity: EntityKind::Event,
                        field: "title",
                        value: title.to_string(),
                    });
                }
            }
            let fields = validate_event_fields(draft)?;
            let venue = self.resolve_venue(draft.venue_id)?;

            let event = self
                .events
                .save_event(&build_record(None, fields, venue, draft))?;
            info!(
                "event=event_create module=service status=ok event_id={} venue_id={}",
                event.id, event.venue.id
            );
            Ok(event)
        })
    }

    /// Gets one event by id, with its venue.
    pub fn get_event(&self, id: EventId) -> OperationResult<Event> {
        observe("event_get", || {
            let id = require_positive_id(EntityKind::Event, id)?;
            self.events
                .get_event(id)?
                .ok_or(OperationError::NotFound {
                    entity: EntityKind::Event,
                    id,
                })
        })
    }

    /// Lists all events in store order.
    pub fn list_events(&self) -> OperationResult<Vec<Event>> {
        observe("event_list", || Ok(self.events.list_events()?))
    }

    /// Lists events held at one venue. An unknown venue yields an empty list.
    pub fn list_events_by_venue(&self, venue_id: VenueId) -> OperationResult<Vec<Event>> {
        observe("event_list_by_venue", || {
            let venue_id = require_positive_id(EntityKind::Venue, venue_id)?;
            Ok(self.events.list_events_by_venue(venue_id)?)
        })
    }

    /// Lists events whose title matches exactly.
    pub fn list_events_by_title(&self, title: &str) -> OperationResult<Vec<Event>> {
        observe("event_list_by_title", || {
            Ok(self.events.list_events_by_title(title)?)
        })
    }

    /// Lists events hosted by the given organiser.
    pub fn list_events_by_host(&self, hosted_by: &str) -> OperationResult<Vec<Event>> {
        observe("event_list_by_host", || {
            Ok(self.events.list_events_by_host(hosted_by)?)
        })
    }

    /// Writes an event under `id`, re-validating fields and re-resolving the venue.
    ///
    /// # Errors
    /// - `InvalidIdentifier` for a non-positive id.
    /// - `Validation` under the create rules (title uniqueness excluded).
    /// - `NotFound` when the referenced venue does not exist.
    pub fn update_event(&self, id: EventId, draft: &EventDraft) -> OperationResult<Event> {
        observe("event_update", || {
            let id = require_positive_id(EntityKind::Event, id)?;
            let fields = validate_event_fields(draft)?;
            let venue = self.resolve_venue(draft.venue_id)?;

            let event = self
                .events
                .save_event(&build_record(Some(id), fields, venue, draft))?;
            info!(
                "event=event_update module=service status=ok event_id={id} venue_id={}",
                event.venue.id
            );
            Ok(event)
        })
    }

    /// Deletes an existing event.
    pub fn delete_event(&self, id: EventId) -> OperationResult<()> {
        observe("event_delete", || {
            let id = require_positive_id(EntityKind::Event, id)?;
            if !self.events.event_exists(id)? {
                return Err(OperationError::NotFound {
                    entity: EntityKind::Event,
                    id,
                });
            }

            self.events.delete_event(id)?;
            info!("event=event_delete module=service status=ok event_id={id}");
            Ok(())
        })
    }

    fn resolve_venue(&self, venue_id: Option<VenueId>) -> OperationResult<Venue> {
        let venue_id = venue_id.ok_or(OperationError::MissingVenue)?;
        self.venues
            .get_venue(venue_id)?
            .ok_or(OperationError::NotFound {
                entity: EntityKind::Venue,
                id: venue_id,
            })
    }
}

fn build_record(
    id: Option<EventId>,
    fields: EventFields,
    venue: Venue,
    draft: &EventDraft,
) -> EventRecord {
    EventRecord {
        id,
        title: fields.title,
        description: fields.description,
        date: fields.date,
        venue,
        hour: draft.hour,
        price: draft.price,
        hosted_by: fields.hosted_by,
    }
}
