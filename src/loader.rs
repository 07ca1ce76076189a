use std::{fs, path::Path};

use itertools::Itertools;
use log::{debug, info};
use serde_json::Value;

use crate::error::{json_type_name, LoadError};

/// Reads a standings export and returns the raw `standings.entries` array.
///
/// Entries are returned as-is; per-entry shape is checked later by
/// [`crate::records::decode_entries`].
pub fn load_entries(path: &Path) -> Result<Vec<Value>, LoadError> {
    debug!("Opening {:?}", path);
    let contents = fs::read_to_string(path)?;
    let entries = parse_entries(&contents)?;
    info!("Read {} entries from {:?}", entries.len(), path);

    Ok(entries)
}

pub fn parse_entries(contents: &str) -> Result<Vec<Value>, LoadError> {
    let document: Value = serde_json::from_str(contents)?;
    let mut top = match document {
        Value::Object(top) => top,
        other => return Err(LoadError::NotAnObject(json_type_name(&other))),
    };
    debug!("JSON keys: {:?}", top.keys().collect_vec());

    let entries = top
        .get_mut("standings")
        .and_then(|standings| standings.get_mut("entries"))
        .map(Value::take)
        .ok_or_else(|| LoadError::MissingEntries(top.keys().cloned().collect()))?;

    match entries {
        Value::Array(entries) => {
            debug!("First 2 entries: {:?}", &entries[..entries.len().min(2)]);
            Ok(entries)
        }
        other => Err(LoadError::EntriesNotArray(json_type_name(&other))),
    }
}
