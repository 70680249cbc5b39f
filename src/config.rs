//! Configuration options for the inventory client

use std::time::Duration;
use url::Url;

use crate::error::{Error, Result};

/// Connection settings for the Supabase project backing the inventory.
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// The base URL for the Supabase project
    pub url: Url,

    /// The anonymous API key for the Supabase project
    pub anon_key: String,

    /// The request timeout
    pub request_timeout: Option<Duration>,

    /// The database schema
    pub db_schema: String,
}

impl InventoryConfig {
    /// Creates a new configuration, validating the URL and key.
    pub fn new(url_str: &str, anon_key: &str) -> Result<Self> {
        let url = Url::parse(url_str)?;
        if anon_key.is_empty() {
            return Err(Error::config("anon_key cannot be empty"));
        }
        Ok(Self {
            url,
            anon_key: anon_key.to_string(),
            request_timeout: Some(Duration::from_secs(30)),
            db_schema: "public".to_string(),
        })
    }

    /// Reads `SUPABASE_URL` and `SUPABASE_ANON_KEY`, plus the optional
    /// `SUPABASE_REQUEST_TIMEOUT_SECS` (0 disables the timeout) and
    /// `SUPABASE_DB_SCHEMA`.
    pub fn from_env() -> Result<Self> {
        let url_str = std::env::var("SUPABASE_URL")
            .map_err(|_| Error::config("SUPABASE_URL environment variable not found"))?;
        let anon_key = std::env::var("SUPABASE_ANON_KEY")
            .map_err(|_| Error::config("SUPABASE_ANON_KEY environment variable not found"))?;

        let mut config = Self::new(&url_str, &anon_key)?;

        if let Ok(secs) = std::env::var("SUPABASE_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::config(format!("SUPABASE_REQUEST_TIMEOUT_SECS is not a number: {}", secs))
            })?;
            config.request_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if let Ok(schema) = std::env::var("SUPABASE_DB_SCHEMA") {
            config.db_schema = schema;
        }

        Ok(config)
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the database schema
    pub fn with_db_schema(mut self, value: &str) -> Self {
        self.db_schema = value.to_string();
        self
    }

    /// The project URL without a trailing slash
    pub(crate) fn base_url(&self) -> &str {
        self.url.as_str().trim_end_matches('/')
    }
}
