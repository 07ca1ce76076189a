use std::io;

use thiserror::Error;

/// Fatal problems with the shape of the input document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
    #[error("input is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected the top level to be an object, got {0}")]
    NotAnObject(&'static str),
    #[error("could not find standings.entries; available keys: {0:?}")]
    MissingEntries(Vec<String>),
    #[error("expected standings.entries to be an array, got {0}")]
    EntriesNotArray(&'static str),
}

/// An entry that does not match the expected input schema.
#[derive(Debug, Error)]
#[error("standings.entries[{index}]: {source}")]
pub struct DecodeError {
    pub index: usize,
    #[source]
    pub source: serde_json::Error,
}

/// A single entry or stat that cannot be turned into an output record.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MappingError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("no stat named `{0}`")]
    MissingStat(String),
    #[error("stat `{0}` has no numeric value")]
    NonNumericStat(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("store URL `{0}` is not a valid http(s) URL")]
    InvalidUrl(String),
    #[error("store API key is empty")]
    EmptyApiKey,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("could not serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
