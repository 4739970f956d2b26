//! Venue/event operations.
//!
//! # Responsibility
//! - Validate requests, enforce uniqueness and referential integrity, then
//!   delegate persistence to store implementations.
//! - Surface every failure as a typed `OperationError`.
//!
//! # Invariants
//! - Guards run in a fixed order; the first violation is the one reported.
//! - Non-positive ids are rejected before any store call.
//! - Operations never retry and never recover from store failures.

use log::{debug, error, warn};
use std::time::Instant;

pub mod error;
pub mod event_service;
mod validation;
pub mod venue_service;

use error::{ErrorKind, OperationResult};

/// Runs one operation body and records its outcome.
///
/// Only metadata is logged: operation name, duration and error kind.
pub(crate) fn observe<T, F>(operation: &'static str, body: F) -> OperationResult<T>
where
    F: FnOnce() -> OperationResult<T>,
{
    let started_at = Instant::now();
    let result = body();
    let duration_ms = started_at.elapsed().as_millis();

    match &result {
        Ok(_) => debug!("event={operation} module=service status=ok duration_ms={duration_ms}"),
        Err(err) if err.kind() == ErrorKind::Store => error!(
            "event={operation} module=service status=error duration_ms={duration_ms} error_kind={} error={err}",
            err.kind()
        ),
        Err(err) => warn!(
            "event={operation} module=service status=rejected duration_ms={duration_ms} error_kind={} entity={}",
            err.kind(),
            err.entity().map_or("none", |entity| entity.as_str())
        ),
    }

    result
}
