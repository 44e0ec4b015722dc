mod cli;
mod prompts;
mod resources;
mod sse;
mod stdio;
mod tools;

pub use cli::{App, Commands};

use crate::esa::{EsaApi, EsaClient, EsaConfig};
use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// Server name reported by `initialize`.
pub const SERVER_NAME: &str = "esamcp";

// JSON-RPC 2.0 types
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    id: Option<serde_json::Value>,
    method: String,
    params: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    jsonrpc: String,
    id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    fn new(id: Option<serde_json::Value>, result: Result<serde_json::Value, JsonRpcError>) -> Self {
        let (result, error) = match result {
            Ok(value) => (Some(value), None),
            Err(error) => (None, Some(error)),
        };

        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result,
            error,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcError {
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: -32602,
            message: message.into(),
            data: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: -32603,
            message: message.into(),
            data: None,
        }
    }
}

/// Serialize a handler result into the JSON-RPC `result` value.
pub fn to_result<T: Serialize>(value: &T) -> Result<serde_json::Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal(format!("Internal error: {e}")))
}

/// Decode `params` (or tool arguments); a missing value counts as `{}`.
pub fn parse_params<T: serde::de::DeserializeOwned>(
    params: Option<serde_json::Value>,
    what: &str,
) -> Result<T, JsonRpcError> {
    let params = match params {
        None | Some(serde_json::Value::Null) => serde_json::Value::Object(Default::default()),
        Some(params) => params,
    };

    serde_json::from_value(params)
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid {what}: {e}")))
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command.unwrap_or(Commands::Stdio) {
        Commands::Stdio => stdio::run_stdio(global).await,
        Commands::Sse(options) => sse::run_sse(options, global).await,
    }
}

/// Handle one JSON-RPC frame. Notifications (no `id`) get no response.
pub async fn handle_request(request_str: &str, global: &crate::Global) -> Option<JsonRpcResponse> {
    let request: JsonRpcRequest = match serde_json::from_str(request_str) {
        Ok(req) => req,
        Err(e) => {
            return Some(JsonRpcResponse::new(
                None,
                Err(JsonRpcError {
                    code: -32700,
                    message: format!("Parse error: {e}"),
                    data: None,
                }),
            ));
        }
    };

    if request.id.is_none() {
        log::debug!("Notification: {}", request.method);
        return None;
    }

    let result = match create_client(global) {
        Ok(client) => dispatch(&request.method, request.params, &client, global).await,
        Err(error) => Err(JsonRpcError::internal(error.to_string())),
    };

    Some(JsonRpcResponse::new(request.id, result))
}

/// One client per incoming request.
fn create_client(global: &crate::Global) -> Result<EsaClient, crate::error::Error> {
    EsaClient::new(&EsaConfig::from_global(global)?)
}

async fn dispatch<A: EsaApi>(
    method: &str,
    params: Option<serde_json::Value>,
    api: &A,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    match method {
        "initialize" => tools::handle_initialize(),
        "ping" => Ok(serde_json::json!({})),
        "tools/list" => tools::handle_tools_list(),
        "tools/call" => tools::handle_tools_call(params, api, global).await,
        "resources/list" => resources::handle_resources_list(api).await,
        "resources/templates/list" => resources::handle_resource_templates_list(),
        "resources/read" => resources::handle_resources_read(params, api).await,
        "prompts/list" => prompts::handle_prompts_list(global.locale),
        "prompts/get" => prompts::handle_prompts_get(params, api).await,
        method => Err(JsonRpcError {
            code: -32601,
            message: format!("Method not found: {method}"),
            data: None,
        }),
    }
}
