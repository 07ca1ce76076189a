use std::path::Path;

use anyhow::{Context, Result};
use log::info;

pub mod config;
pub mod error;
pub mod extract;
pub mod loader;
pub mod preview;
pub mod records;
pub mod store;
pub mod upsert;

pub use config::StoreConfig;
pub use records::{DriverRecord, Entry, RaceRecord, StandingRecord};
pub use store::{Conflict, RestStore, StoreResponse, SupabaseStore, Table};
pub use upsert::{SyncReport, UpsertOutcome};

/// Loads and decodes a standings export. Any structural problem is fatal.
pub fn read_entries(path: &Path) -> Result<Vec<Entry>> {
    let raw = loader::load_entries(path).with_context(|| format!("Failed to load {:?}", path))?;
    let entries = records::decode_entries(raw)?;

    Ok(entries)
}

/// Load, extract and upsert everything in `path` through `store`.
pub async fn sync_file<S: RestStore>(path: &Path, store: &S) -> Result<SyncReport> {
    let entries = read_entries(path)?;
    sync_entries(&entries, store).await
}

pub async fn sync_entries<S: RestStore>(entries: &[Entry], store: &S) -> Result<SyncReport> {
    let drivers = extract::unique_drivers(entries);
    let races = extract::unique_races(entries);

    info!("Upserting {} drivers", drivers.len());
    let drivers = upsert::upsert_drivers(store, &drivers).await?;
    info!("Upserting {} races", races.len());
    let races = upsert::upsert_races(store, &races).await?;
    info!("Inserting {} standings", entries.len());
    let standings = upsert::upsert_standings(store, entries).await?;

    Ok(SyncReport {
        drivers,
        races,
        standings,
    })
}
