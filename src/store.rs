use log::debug;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

use crate::{config::StoreConfig, error::StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Drivers,
    Races,
    Standings,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Table::Drivers => "drivers",
            Table::Races => "races",
            Table::Standings => "f1_standings",
        }
    }
}

/// What the store should do when a row with the same primary key exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    /// Merge into the existing row.
    Merge,
    /// Plain insert; a repeated key is rejected or duplicated depending on the table.
    Insert,
}

impl Conflict {
    /// Value of the `Prefer` header. Response bodies are always suppressed.
    pub fn prefer_header(self) -> &'static str {
        match self {
            Conflict::Merge => "resolution=merge-duplicates,return=minimal",
            Conflict::Insert => "return=minimal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreResponse {
    pub status: u16,
    pub body: String,
}

impl StoreResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A table-oriented REST endpoint that accepts one JSON row per call.
#[allow(async_fn_in_trait)]
pub trait RestStore {
    async fn post(
        &self,
        table: Table,
        row: &Value,
        conflict: Conflict,
    ) -> Result<StoreResponse, StoreError>;
}

/// PostgREST endpoint of a Supabase project.
pub struct SupabaseStore {
    client: reqwest::Client,
    config: StoreConfig,
}

impl SupabaseStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

impl RestStore for SupabaseStore {
    async fn post(
        &self,
        table: Table,
        row: &Value,
        conflict: Conflict,
    ) -> Result<StoreResponse, StoreError> {
        let url = self.config.table_url(table.name());
        debug!("POST {} [{}]", url, conflict.prefer_header());

        let transport = |source| StoreError::Transport {
            url: url.clone(),
            source,
        };
        let res = self
            .client
            .post(&url)
            .header("apikey", self.config.api_key())
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key()))
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", conflict.prefer_header())
            .json(row)
            .send()
            .await
            .map_err(transport)?;

        let status = res.status().as_u16();
        let body = res.text().await.map_err(transport)?;

        Ok(StoreResponse { status, body })
    }
}
