mod attachments;
mod categories;
mod comments;
mod post_actions;
mod posts;
mod search;
mod teams;

use crate::esa::{self, EsaApi};
use crate::prelude::{eprintln, *};
use esamcp_core::response::ToolResult;
use serde::{Deserialize, Serialize};

// Re-export types needed by tool definitions
pub use super::{parse_params, to_result, JsonRpcError};

const TEAM_NAME_DESCRIPTION: &str =
    "Team name (required). Use esa_get_teams first to see available teams.";

// MCP Protocol types
#[derive(Debug, Serialize)]
pub struct Tool {
    pub name: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

impl Tool {
    pub fn new(name: &str, title: &str, description: &str, input_schema: serde_json::Value) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<Capability>,
    pub resources: Option<Capability>,
    pub prompts: Option<Capability>,
}

#[derive(Debug, Serialize)]
pub struct Capability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

/// JSON schema of a team-scoped tool: `teamName` plus `properties`.
pub fn team_schema(properties: serde_json::Value, required: &[&str]) -> serde_json::Value {
    let mut all = serde_json::Map::new();
    all.insert(
        "teamName".to_string(),
        serde_json::json!({"type": "string", "description": TEAM_NAME_DESCRIPTION}),
    );
    if let serde_json::Value::Object(properties) = properties {
        all.extend(properties);
    }

    serde_json::json!({
        "type": "object",
        "properties": all,
        "required": required
    })
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(Capability {}),
            resources: Some(Capability {}),
            prompts: Some(Capability {}),
        },
        server_info: ServerInfo {
            name: super::SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    to_result(&result)
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let tools = [
        teams::definitions(),
        posts::definitions(),
        search::definitions(),
        comments::definitions(),
        categories::definitions(),
        post_actions::definitions(),
        attachments::definitions(),
    ]
    .into_iter()
    .flatten()
    .collect();

    to_result(&ToolsList { tools })
}

fn arguments<T: serde::de::DeserializeOwned>(
    arguments: Option<serde_json::Value>,
) -> Result<T, JsonRpcError> {
    parse_params(arguments, "arguments")
}

fn validated(check: Result<(), String>) -> Result<(), JsonRpcError> {
    check.map_err(|e| JsonRpcError::invalid_params(format!("Invalid arguments: {e}")))
}

pub async fn handle_tools_call<A: EsaApi>(
    params: Option<serde_json::Value>,
    api: &A,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = parse_params(params, "params")?;
    let args = params.arguments;

    if global.verbose {
        eprintln!(
            "Calling {}: {}",
            params.name,
            args.as_ref().map(|a| a.to_string()).unwrap_or_default()
        );
    }

    let result: ToolResult = match params.name.as_str() {
        "esa_get_teams" => esa::teams::get_teams(api, arguments(args)?).await,
        "esa_get_team_stats" => esa::teams::get_team_stats(api, arguments(args)?).await,
        "esa_get_team_tags" => esa::teams::get_team_tags(api, arguments(args)?).await,
        "esa_get_team_members" => esa::teams::get_team_members(api, arguments(args)?).await,
        "esa_get_post" => esa::posts::get_post(api, arguments(args)?).await,
        "esa_create_post" => esa::posts::create_post(api, arguments(args)?).await,
        "esa_update_post" => esa::posts::update_post(api, arguments(args)?).await,
        "esa_search_posts" => {
            let args: esa::search::SearchPostsArgs = arguments(args)?;
            validated(args.validate())?;
            esa::search::search_posts(api, args).await
        }
        "esa_get_comment" => esa::comments::get_comment(api, arguments(args)?).await,
        "esa_create_comment" => esa::comments::create_comment(api, arguments(args)?).await,
        "esa_update_comment" => esa::comments::update_comment(api, arguments(args)?).await,
        "esa_delete_comment" => esa::comments::delete_comment(api, arguments(args)?).await,
        "esa_get_post_comments" => esa::comments::get_post_comments(api, arguments(args)?).await,
        "esa_get_team_comments" => esa::comments::get_team_comments(api, arguments(args)?).await,
        "esa_get_categories" => esa::categories::get_categories(api, arguments(args)?).await,
        "esa_get_top_categories" => {
            esa::categories::get_top_categories(api, arguments(args)?).await
        }
        "esa_get_all_category_paths" => {
            esa::categories::get_all_category_paths(api, arguments(args)?).await
        }
        "esa_archive_post" => esa::post_actions::archive_post(api, arguments(args)?).await,
        "esa_ship_post" => esa::post_actions::ship_post(api, arguments(args)?).await,
        "esa_duplicate_post" => esa::post_actions::duplicate_post(api, arguments(args)?).await,
        "esa_get_search_options_help" => esa::helps::get_search_options_help(api).await,
        "esa_get_markdown_syntax_help" => esa::helps::get_markdown_syntax_help(api).await,
        "esa_search_help" => {
            let args: esa::helps::SearchHelpArgs = arguments(args)?;
            validated(args.validate())?;
            esa::helps::search_help(api, args).await
        }
        "esa_get_attachment" => {
            let args: esa::attachments::GetAttachmentArgs = arguments(args)?;
            validated(args.validate())?;
            esa::attachments::get_attachment(api, args).await
        }
        name => {
            return Err(JsonRpcError::invalid_params(format!("Unknown tool: {name}")));
        }
    };

    to_result(&result)
}
