use log::{error, info};
use serde::Serialize;

use crate::{
    error::{MappingError, StoreError},
    records::{driver_record, race_record, standing_record, Entry, Stat},
    store::{Conflict, RestStore, Table},
};

/// Result of sending one record.
#[derive(Debug, Clone, PartialEq)]
pub enum UpsertOutcome {
    Stored {
        table: Table,
        key: String,
    },
    Rejected {
        table: Table,
        key: String,
        status: u16,
        message: String,
    },
    Unmapped {
        table: Table,
        key: String,
        error: MappingError,
    },
}

impl UpsertOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UpsertOutcome::Stored { .. })
    }

    pub fn key(&self) -> &str {
        match self {
            UpsertOutcome::Stored { key, .. }
            | UpsertOutcome::Rejected { key, .. }
            | UpsertOutcome::Unmapped { key, .. } => key,
        }
    }
}

pub async fn upsert_drivers<S: RestStore>(
    store: &S,
    drivers: &[&Entry],
) -> Result<Vec<UpsertOutcome>, StoreError> {
    let mut outcomes = Vec::with_capacity(drivers.len());
    for entry in drivers {
        let key = entry.athlete.id.clone();
        let outcome = send(store, Table::Drivers, Conflict::Merge, key, driver_record(entry), |r| {
            r.driver_name.clone()
        })
        .await?;
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

pub async fn upsert_races<S: RestStore>(
    store: &S,
    races: &[&Stat],
) -> Result<Vec<UpsertOutcome>, StoreError> {
    let mut outcomes = Vec::with_capacity(races.len());
    for stat in races {
        let key = stat.name.clone();
        let outcome = send(store, Table::Races, Conflict::Merge, key, race_record(stat), |r| {
            r.race_name.clone()
        })
        .await?;
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

/// Standings are plain inserts: re-running against the same input may be
/// rejected or produce duplicate rows, depending on the table's constraints.
pub async fn upsert_standings<S: RestStore>(
    store: &S,
    entries: &[Entry],
) -> Result<Vec<UpsertOutcome>, StoreError> {
    let mut outcomes = Vec::with_capacity(entries.len());
    for entry in entries {
        let key = entry.athlete.id.clone();
        let outcome = send(
            store,
            Table::Standings,
            Conflict::Insert,
            key,
            standing_record(entry),
            |r| format!("driver ID {}", r.driver_id),
        )
        .await?;
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

/// Passes a mapped record through, or logs why it cannot be sent and turns
/// the mapping error into an [`UpsertOutcome::Unmapped`].
pub fn map_row<R>(
    table: Table,
    key: &str,
    record: Result<R, MappingError>,
) -> Result<R, UpsertOutcome> {
    record.map_err(|error| {
        error!("Skipping {} row {:?}: {}", table.name(), key, error);
        UpsertOutcome::Unmapped {
            table,
            key: key.to_string(),
            error,
        }
    })
}

async fn send<S, R, L>(
    store: &S,
    table: Table,
    conflict: Conflict,
    key: String,
    record: Result<R, MappingError>,
    label: L,
) -> Result<UpsertOutcome, StoreError>
where
    S: RestStore,
    R: Serialize + std::fmt::Debug,
    L: Fn(&R) -> String,
{
    let record = match map_row(table, &key, record) {
        Ok(record) => record,
        Err(unmapped) => return Ok(unmapped),
    };

    let row = serde_json::to_value(&record)?;
    let response = store.post(table, &row, conflict).await?;
    if response.is_success() {
        info!("{} stored: {}", table.name(), label(&record));
        Ok(UpsertOutcome::Stored { table, key })
    } else {
        error!(
            "Failed to store {} row {:?}: HTTP {}, {}",
            table.name(),
            record,
            response.status,
            response.body
        );
        Ok(UpsertOutcome::Rejected {
            table,
            key,
            status: response.status,
            message: response.body,
        })
    }
}

/// Outcomes of one full sync, grouped by table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    pub drivers: Vec<UpsertOutcome>,
    pub races: Vec<UpsertOutcome>,
    pub standings: Vec<UpsertOutcome>,
}

impl SyncReport {
    pub fn outcomes(&self) -> impl Iterator<Item = &UpsertOutcome> {
        self.drivers
            .iter()
            .chain(&self.races)
            .chain(&self.standings)
    }

    pub fn attempted(&self) -> usize {
        self.outcomes().count()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.attempted() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = &UpsertOutcome> {
        self.outcomes().filter(|o| !o.is_success())
    }
}
