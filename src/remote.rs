//! Remote table access
//!
//! Services talk to storage only through [`TableApi`], which speaks in JSON
//! rows. [`PostgrestTables`] implements it over the PostgREST HTTP API.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use supabase_rust_postgrest::{PostgrestClient, ReturnOption};
use tracing::debug;

use crate::config::InventoryConfig;
use crate::error::RemoteError;

/// An equality filter, `column = value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EqFilter {
    pub column: String,
    pub value: String,
}

impl EqFilter {
    pub fn new<V: ToString>(column: &str, value: V) -> Self {
        Self {
            column: column.to_string(),
            value: value.to_string(),
        }
    }
}

/// Table-oriented access to the remote store.
#[async_trait]
pub trait TableApi: Send + Sync {
    /// Rows of `table` projected to `columns`, matching every filter
    async fn select(
        &self,
        table: &str,
        columns: &str,
        filters: &[EqFilter],
    ) -> Result<Vec<Value>, RemoteError>;

    /// Exactly one row; none or several is an error
    async fn select_single(
        &self,
        table: &str,
        columns: &str,
        filters: &[EqFilter],
    ) -> Result<Value, RemoteError>;

    /// Inserts `row` and returns what the remote sends back, either one
    /// object or an array of inserted rows
    async fn insert(&self, table: &str, row: Value) -> Result<Value, RemoteError>;

    /// Updates the rows matching `filters` with `row`
    async fn update(
        &self,
        table: &str,
        row: Value,
        filters: &[EqFilter],
    ) -> Result<(), RemoteError>;
}

/// [`TableApi`] over a Supabase project's PostgREST endpoint
#[derive(Debug, Clone)]
pub struct PostgrestTables {
    url: String,
    key: String,
    schema: Option<String>,
    http_client: Client,
}

impl PostgrestTables {
    pub fn new(config: &InventoryConfig, http_client: Client) -> Self {
        let schema = (config.db_schema != "public").then(|| config.db_schema.clone());
        Self {
            url: config.base_url().to_string(),
            key: config.anon_key.clone(),
            schema,
            http_client,
        }
    }

    /// Create a PostgrestClient for one table with the filters applied
    fn from(&self, table: &str, filters: &[EqFilter]) -> Result<PostgrestClient, RemoteError> {
        let mut client = PostgrestClient::new(&self.url, &self.key, table, self.http_client.clone());
        if let Some(schema) = &self.schema {
            client = client.schema(schema)?;
        }
        for filter in filters {
            client = client.eq(&filter.column, &filter.value);
        }
        Ok(client)
    }
}

#[async_trait]
impl TableApi for PostgrestTables {
    async fn select(
        &self,
        table: &str,
        columns: &str,
        filters: &[EqFilter],
    ) -> Result<Vec<Value>, RemoteError> {
        debug!(table, columns, filters = filters.len(), "select");
        let rows = self
            .from(table, filters)?
            .select(columns)
            .execute::<Value>()
            .await?;
        Ok(rows)
    }

    async fn select_single(
        &self,
        table: &str,
        columns: &str,
        filters: &[EqFilter],
    ) -> Result<Value, RemoteError> {
        debug!(table, columns, filters = filters.len(), "select single");
        let row = self
            .from(table, filters)?
            .select(columns)
            .execute_single::<Value>()
            .await?;
        Ok(row)
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value, RemoteError> {
        debug!(table, "insert");
        let inserted = self
            .from(table, &[])?
            .returning(ReturnOption::Representation)
            .insert(row)
            .await?;
        Ok(inserted)
    }

    async fn update(
        &self,
        table: &str,
        row: Value,
        filters: &[EqFilter],
    ) -> Result<(), RemoteError> {
        debug!(table, filters = filters.len(), "update");
        self.from(table, filters)?
            .returning(ReturnOption::Minimal)
            .update(row)
            .await?;
        Ok(())
    }
}
