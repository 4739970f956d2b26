//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `eventify_core` linkage and schema bootstrap without a transport.
//! - Keep output deterministic for quick local sanity checks.

use eventify_core::db::migrations::latest_version;
use eventify_core::db::open_db_in_memory;
use eventify_core::{EventService, SqliteEventRepository, SqliteVenueRepository, VenueService};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("eventify_core ping={}", eventify_core::ping());
    println!("eventify_core version={}", eventify_core::core_version());

    match probe_store() {
        Ok((venues, events)) => {
            println!("eventify_core schema_version={}", latest_version());
            println!("eventify_core store=ok venues={venues} events={events}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("eventify_core store=error error={err}");
            ExitCode::FAILURE
        }
    }
}

fn probe_store() -> Result<(usize, usize), Box<dyn std::error::Error>> {
    let conn = open_db_in_memory()?;
    let venue_repo = SqliteVenueRepository::try_new(&conn)?;
    let event_repo = SqliteEventRepository::try_new(&conn)?;

    let venues = VenueService::new(&venue_repo).list_venues()?;
    let events = EventService::new(&event_repo, &venue_repo).list_events()?;
    Ok((venues.len(), events.len()))
}
