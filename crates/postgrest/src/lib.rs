//! Supabase PostgREST client for Rust
//!
//! This crate provides the table access used by the inventory services:
//! selecting rows with a column projection and equality filters, reading a
//! single object, and inserting or updating rows.
//!
//! # Features
//!
//! - Query API (`select`, `insert`, `update`)
//! - Equality filtering (`eq`)
//! - Single-object reads (`single`)
//! - Schema selection (`schema`)

use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use url::Url;

/// Media type PostgREST uses to return a single object instead of an array
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// PostgREST APIエラーの詳細情報
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PostgrestApiErrorDetails {
    pub code: Option<String>,
    pub message: Option<String>,
    pub details: Option<String>,
    pub hint: Option<String>,
}

// エラー詳細を整形して表示するための Display 実装
impl fmt::Display for PostgrestApiErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(code) = &self.code {
            parts.push(format!("Code: {}", code));
        }
        if let Some(message) = &self.message {
            parts.push(format!("Message: {}", message));
        }
        if let Some(details) = &self.details {
            parts.push(format!("Details: {}", details));
        }
        if let Some(hint) = &self.hint {
            parts.push(format!("Hint: {}", hint));
        }
        write!(f, "{}", parts.join(", "))
    }
}

/// エラー型
#[derive(Error, Debug)]
pub enum PostgrestError {
    #[error("API error: {details} (Status: {status})")]
    ApiError {
        details: PostgrestApiErrorDetails,
        status: reqwest::StatusCode,
    },

    #[error("API error (unparsed): {message} (Status: {status})")]
    UnparsedApiError {
        message: String,
        status: reqwest::StatusCode,
    },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

impl PostgrestError {
    /// The human-readable part of the error, without status or code decoration.
    ///
    /// For API errors this is PostgREST's `message` field, falling back to
    /// the raw response body.
    pub fn message(&self) -> String {
        match self {
            PostgrestError::ApiError { details, .. } => details
                .message
                .clone()
                .unwrap_or_else(|| details.to_string()),
            PostgrestError::UnparsedApiError { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status of the failed response, if the server answered at all
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            PostgrestError::ApiError { status, .. }
            | PostgrestError::UnparsedApiError { status, .. } => Some(*status),
            PostgrestError::NetworkError(e) => e.status(),
            _ => None,
        }
    }

    /// PostgREST / PostgreSQL error code (e.g. `PGRST116`, `23502`)
    pub fn code(&self) -> Option<&str> {
        match self {
            PostgrestError::ApiError { details, .. } => details.code.as_deref(),
            _ => None,
        }
    }
}

/// Options for returning data from write requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnOption {
    /// Return representation (the data)
    #[default]
    Representation,

    /// Return minimal data
    Minimal,
}

impl ReturnOption {
    /// Convert the option to its `Prefer` header value
    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnOption::Representation => "return=representation",
            ReturnOption::Minimal => "return=minimal",
        }
    }
}

/// PostgreST クライアント
#[derive(Debug, Clone)]
pub struct PostgrestClient {
    base_url: String,
    table: String,
    http_client: Client,
    headers: HeaderMap,
    query_params: BTreeMap<String, String>,
    returning: ReturnOption,
}

impl PostgrestClient {
    /// 新しい PostgreST クライアントを作成
    ///
    /// The API key is sent both as `apikey` and as the bearer token.
    pub fn new(base_url: &str, api_key: &str, table: &str, http_client: Client) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        if let Ok(value) = HeaderValue::from_str(api_key) {
            headers.insert("apikey", value);
        }
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", api_key)) {
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            table: table.to_string(),
            http_client,
            headers,
            query_params: BTreeMap::new(),
            returning: ReturnOption::default(),
        }
    }

    /// ヘッダーを追加
    pub fn with_header(mut self, key: &str, value: &str) -> Result<Self, PostgrestError> {
        let header_value = HeaderValue::from_str(value).map_err(|_| {
            PostgrestError::InvalidParameters(format!("Invalid header value: {}", value))
        })?;

        let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|_| {
            PostgrestError::InvalidParameters(format!("Invalid header name: {}", key))
        })?;

        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    /// スキーマを指定（デフォルトのpublicスキーマではない場合）
    ///
    /// Reads use `Accept-Profile`, writes use `Content-Profile`; both are set.
    pub fn schema(self, schema_name: &str) -> Result<Self, PostgrestError> {
        self.with_header("Accept-Profile", schema_name)?
            .with_header("Content-Profile", schema_name)
    }

    /// 取得するカラムを指定
    ///
    /// Whitespace outside double quotes is stripped, so
    /// `"id, name, inventory(quantity)"` is sent as `id,name,inventory(quantity)`.
    pub fn select(mut self, columns: &str) -> Self {
        self.query_params
            .insert("select".to_string(), clean_columns(columns));
        self
    }

    /// 等価フィルター
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.query_params
            .insert(column.to_string(), format!("eq.{}", value));
        self
    }

    /// Choose what write requests return
    pub fn returning(mut self, option: ReturnOption) -> Self {
        self.returning = option;
        self
    }

    /// データを取得
    pub async fn execute<T: for<'de> Deserialize<'de>>(&self) -> Result<Vec<T>, PostgrestError> {
        let url = self.build_url()?;
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(PostgrestError::NetworkError)?;

        let response = check_status(response).await?;

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| PostgrestError::DeserializationError(e.to_string()))
    }

    /// 単一レコードを取得
    ///
    /// Asks PostgREST for exactly one object. Zero or several matching rows
    /// are reported by the server as an API error (`PGRST116`, status 406).
    pub async fn execute_single<T: for<'de> Deserialize<'de>>(&self) -> Result<T, PostgrestError> {
        let url = self.build_url()?;
        debug!("GET {} (single)", url);

        let mut headers = self.headers.clone();
        headers.insert(
            reqwest::header::ACCEPT,
            HeaderValue::from_static(SINGLE_OBJECT),
        );

        let response = self
            .http_client
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(PostgrestError::NetworkError)?;

        let response = check_status(response).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| PostgrestError::DeserializationError(e.to_string()))
    }

    /// データを挿入
    ///
    /// Returns the parsed response body; `Value::Null` when the server sent
    /// no content.
    pub async fn insert<T: Serialize>(&self, values: T) -> Result<Value, PostgrestError> {
        let url = self.build_url()?;
        debug!("POST {} ({})", url, self.returning.as_str());

        let response = self
            .http_client
            .post(&url)
            .headers(self.write_headers())
            .json(&values)
            .send()
            .await
            .map_err(PostgrestError::NetworkError)?;

        read_body(check_status(response).await?).await
    }

    /// データを更新
    ///
    /// Filters added with [`eq`](Self::eq) select the rows to update. An
    /// update that matches no rows is still a success.
    pub async fn update<T: Serialize>(&self, values: T) -> Result<Value, PostgrestError> {
        let url = self.build_url()?;
        debug!("PATCH {} ({})", url, self.returning.as_str());

        let response = self
            .http_client
            .patch(&url)
            .headers(self.write_headers())
            .json(&values)
            .send()
            .await
            .map_err(PostgrestError::NetworkError)?;

        read_body(check_status(response).await?).await
    }

    fn write_headers(&self) -> HeaderMap {
        let mut headers = self.headers.clone();
        headers.insert(
            HeaderName::from_static("prefer"),
            HeaderValue::from_static(self.returning.as_str()),
        );
        headers
    }

    // URLを構築
    fn build_url(&self) -> Result<String, PostgrestError> {
        let mut url = Url::parse(&format!("{}/rest/v1/{}", self.base_url, self.table))?;

        for (key, value) in &self.query_params {
            url.query_pairs_mut().append_pair(key, value);
        }

        Ok(url.to_string())
    }
}

/// Turns a non-success response into an API error
async fn check_status(response: Response) -> Result<Response, PostgrestError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read error response".to_string());

    // Bodies without a `message` (gateway errors, proxies) keep their raw text
    match serde_json::from_str::<PostgrestApiErrorDetails>(&error_text) {
        Ok(details) if details.message.is_some() => {
            Err(PostgrestError::ApiError { details, status })
        }
        _ => Err(PostgrestError::UnparsedApiError {
            message: error_text,
            status,
        }),
    }
}

async fn read_body(response: Response) -> Result<Value, PostgrestError> {
    let body_text = response.text().await.map_err(|e| {
        PostgrestError::DeserializationError(format!("Failed to read response body: {}", e))
    })?;

    // 204 No Content や return=minimal の場合は空
    if body_text.trim().is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str::<Value>(&body_text)
            .map_err(|e| PostgrestError::DeserializationError(e.to_string()))
    }
}

/// Strips whitespace from a select list, except inside double quotes
fn clean_columns(columns: &str) -> String {
    let mut quoted = false;
    columns
        .chars()
        .filter(|c| {
            if *c == '"' {
                quoted = !quoted;
            }
            quoted || !c.is_whitespace()
        })
        .collect()
}
