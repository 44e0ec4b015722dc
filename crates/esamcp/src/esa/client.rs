use esamcp_core::attachment::MAX_INLINE_SIZE;
use esamcp_core::error::OperationError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde_json::Value;

use super::{ApiRequest, ApiResponse, EsaApi, EsaConfig, FetchedFile, Method};
use crate::error::Error;

/// reqwest-backed [`EsaApi`], built once per incoming request.
#[derive(Debug, Clone)]
pub struct EsaClient {
    base_url: String,
    api: reqwest::Client,
    download: reqwest::Client,
}

impl EsaClient {
    pub fn new(config: &EsaConfig) -> Result<Self, Error> {
        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api: create_authenticated_client(config)?,
            download: reqwest::Client::builder()
                .build()
                .map_err(|e| Error::HttpClient(e.to_string()))?,
        })
    }
}

/// Create an HTTP client carrying the bearer token and the esa headers
pub fn create_authenticated_client(config: &EsaConfig) -> Result<reqwest::Client, Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", config.access_token))
            .map_err(|e| Error::InvalidHeader(e.to_string()))?,
    );
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&user_agent()).map_err(|e| Error::InvalidHeader(e.to_string()))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|e| Error::HttpClient(e.to_string()))
}

pub fn user_agent() -> String {
    format!("esa-mcp-server/{} (rust)", env!("CARGO_PKG_VERSION"))
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

fn log_rate_limit(headers: &HeaderMap) {
    let header = |name: &str| headers.get(name).and_then(|value| value.to_str().ok());

    if let (Some(limit), Some(remaining)) =
        (header("x-ratelimit-limit"), header("x-ratelimit-remaining"))
    {
        log::info!("Rate limit: {remaining}/{limit}");
    }
}

fn network_error(error: reqwest::Error) -> OperationError {
    log::error!("Network Error: {error}");
    OperationError::message(error.to_string())
}

/// Decode a response body; non-JSON bodies are kept as a string.
fn decode_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }

    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

impl EsaApi for EsaClient {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, OperationError> {
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = self
            .api
            .request(request.method.into(), &url)
            .query(request.query.pairs());
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(network_error)?;
        log_rate_limit(response.headers());

        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(network_error)?;

        Ok(ApiResponse::new(status, decode_body(&bytes)))
    }

    async fn fetch(&self, url: &str) -> Result<FetchedFile, OperationError> {
        let mut response = self.download.get(url).send().await.map_err(network_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(OperationError::message(format!(
                "Failed to fetch attachment: {status}"
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let mut body = CappedBody::new(MAX_INLINE_SIZE, response.content_length());

        while !body.is_oversized() {
            match response.chunk().await.map_err(network_error)? {
                Some(chunk) => body.push(&chunk),
                None => break,
            }
        }

        Ok(body.into_file(content_type))
    }
}

/// Download buffer that stops keeping bytes once the inline ceiling is passed.
#[derive(Debug)]
struct CappedBody {
    limit: usize,
    declared: Option<u64>,
    received: u64,
    bytes: Vec<u8>,
}

impl CappedBody {
    fn new(limit: usize, declared: Option<u64>) -> Self {
        Self {
            limit,
            declared,
            received: 0,
            bytes: Vec::new(),
        }
    }

    fn is_oversized(&self) -> bool {
        let limit = self.limit as u64;
        self.received > limit || self.declared.is_some_and(|length| length > limit)
    }

    fn push(&mut self, chunk: &[u8]) {
        self.received += chunk.len() as u64;
        if self.is_oversized() {
            self.bytes = Vec::new();
        } else {
            self.bytes.extend_from_slice(chunk);
        }
    }

    fn into_file(self, content_type: String) -> FetchedFile {
        let content_length = self
            .declared
            .map_or(self.received, |length| length.max(self.received));

        FetchedFile {
            content_type,
            content_length: Some(content_length),
            bytes: self.bytes,
        }
    }
}
