//! esa.io API access and the domain operations built on it
//!
//! Every operation is generic over [`EsaApi`] so it can run against the
//! real [`client::EsaClient`] or an in-memory double in tests. Operations
//! never fail: they resolve to a tool, resource or prompt envelope through
//! [`run_tool`], [`run_resource`] and [`run_prompt`].

use std::future::Future;

use esamcp_core::error::OperationError;
use esamcp_core::prompt::Locale;
use esamcp_core::response::{
    format_prompt_error, format_prompt_response, format_resource_error, format_resource_response,
    format_tool_error, format_tool_response, PromptResult, ResourceResult, ToolResult,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod attachments;
pub mod categories;
pub mod client;
pub mod comments;
pub mod helps;
pub mod post_actions;
pub mod posts;
pub mod recent_posts;
pub mod search;
pub mod summarize;
pub mod teams;

#[cfg(test)]
pub mod mock;

pub use client::EsaClient;

/// esa configuration resolved from CLI flags and environment variables
#[derive(Debug, Clone)]
pub struct EsaConfig {
    pub access_token: String,
    pub api_base_url: String,
    pub locale: Locale,
}

impl EsaConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.esa.io";

    pub fn from_global(global: &crate::Global) -> Result<Self, crate::error::Error> {
        let access_token = global
            .access_token
            .clone()
            .filter(|token| !token.is_empty())
            .ok_or(crate::error::Error::MissingAccessToken)?;

        let api_base_url = if global.api_base_url.is_empty() {
            Self::DEFAULT_BASE_URL.to_string()
        } else {
            global.api_base_url.clone()
        };

        Ok(Self {
            access_token,
            api_base_url,
            locale: global.locale,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

/// Query string pairs; `None` values are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(Vec<(String, String)>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, key: &str, value: impl ToString) -> Self {
        self.0.push((key.to_string(), value.to_string()));
        self
    }

    pub fn push_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A request against the esa API, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Query,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Query::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// Decoded JSON body, `Null` when the response had none.
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The body of a 2xx response, or the error it reports.
    pub fn into_success(self) -> Result<Value, OperationError> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(OperationError::from_response(self.status, self.body))
        }
    }
}

/// A file downloaded from a signed URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedFile {
    pub content_type: String,
    pub content_length: Option<u64>,
    /// Left empty when `content_length` exceeds the inline ceiling.
    pub bytes: Vec<u8>,
}

/// Access to the esa API.
pub trait EsaApi: Sync {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, OperationError>> + Send;

    /// Unauthenticated download of a signed URL.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchedFile, OperationError>> + Send;

    fn get(
        &self,
        path: String,
        query: Query,
    ) -> impl Future<Output = Result<Value, OperationError>> + Send {
        async move {
            self.send(ApiRequest::new(Method::Get, path).with_query(query))
                .await?
                .into_success()
        }
    }

    fn post(
        &self,
        path: String,
        body: Value,
    ) -> impl Future<Output = Result<Value, OperationError>> + Send {
        async move {
            self.send(ApiRequest::new(Method::Post, path).with_body(body))
                .await?
                .into_success()
        }
    }

    fn patch(
        &self,
        path: String,
        body: Value,
    ) -> impl Future<Output = Result<Value, OperationError>> + Send {
        async move {
            self.send(ApiRequest::new(Method::Patch, path).with_body(body))
                .await?
                .into_success()
        }
    }

    fn delete(&self, path: String) -> impl Future<Output = Result<Value, OperationError>> + Send {
        async move {
            self.send(ApiRequest::new(Method::Delete, path))
                .await?
                .into_success()
        }
    }
}

/// `/v1/teams/{team_name}{rest}` with the team name percent-encoded.
pub fn team_path(team_name: &str, rest: &str) -> String {
    format!("/v1/teams/{}{rest}", urlencoding::encode(team_name))
}

pub fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, OperationError> {
    Ok(serde_json::from_value(value)?)
}

/// Resolve a data operation into a tool envelope.
pub async fn run_tool<T, F>(operation: F) -> ToolResult
where
    T: Serialize,
    F: Future<Output = Result<T, OperationError>>,
{
    match operation.await {
        Ok(data) => format_tool_response(&data),
        Err(error) => format_tool_error(&error),
    }
}

/// Like [`run_tool`], for operations that build their own content items.
pub async fn run_tool_content<F>(operation: F) -> ToolResult
where
    F: Future<Output = Result<ToolResult, OperationError>>,
{
    operation
        .await
        .unwrap_or_else(|error| format_tool_error(&error))
}

pub async fn run_resource<T, F>(uri: &str, operation: F) -> ResourceResult
where
    T: Serialize,
    F: Future<Output = Result<T, OperationError>>,
{
    match operation.await {
        Ok(data) => format_resource_response(&data, uri),
        Err(error) => format_resource_error(&error, uri),
    }
}

pub async fn run_prompt<F>(operation: F) -> PromptResult
where
    F: Future<Output = Result<String, OperationError>>,
{
    match operation.await {
        Ok(message) => format_prompt_response(message),
        Err(error) => format_prompt_error(&error),
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    Desc,
    Asc,
}

impl Order {
    pub fn as_str(self) -> &'static str {
        match self {
            Order::Desc => "desc",
            Order::Asc => "asc",
        }
    }
}

impl std::fmt::Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
