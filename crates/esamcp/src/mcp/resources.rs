use crate::esa::{recent_posts, EsaApi};
use esamcp_core::response::JSON_MIME_TYPE;
use esamcp_core::team::{parse_recent_posts_uri, ResourceDescriptor, RECENT_POSTS_TEMPLATE};
use serde::{Deserialize, Serialize};

use super::{parse_params, to_result, JsonRpcError};

#[derive(Debug, Serialize)]
pub struct ResourcesList {
    pub resources: Vec<ResourceDescriptor>,
}

#[derive(Debug, Serialize)]
pub struct ResourceTemplate {
    #[serde(rename = "uriTemplate")]
    pub uri_template: String,
    pub name: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

#[derive(Debug, Serialize)]
pub struct ResourceTemplatesList {
    #[serde(rename = "resourceTemplates")]
    pub resource_templates: Vec<ResourceTemplate>,
}

#[derive(Debug, Deserialize)]
pub struct ReadResourceParams {
    pub uri: String,
}

pub async fn handle_resources_list<A: EsaApi>(
    api: &A,
) -> Result<serde_json::Value, JsonRpcError> {
    let resources = recent_posts::list_recent_posts_resources(api).await;

    to_result(&ResourcesList { resources })
}

pub fn handle_resource_templates_list() -> Result<serde_json::Value, JsonRpcError> {
    to_result(&ResourceTemplatesList {
        resource_templates: vec![ResourceTemplate {
            uri_template: RECENT_POSTS_TEMPLATE.to_string(),
            name: "esa_recent_posts".to_string(),
            title: "Recent Posts".to_string(),
            description: "Fetch recent updated posts from esa team".to_string(),
            mime_type: JSON_MIME_TYPE.to_string(),
        }],
    })
}

pub async fn handle_resources_read<A: EsaApi>(
    params: Option<serde_json::Value>,
    api: &A,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: ReadResourceParams = parse_params(params, "params")?;

    let Some(team_name) = parse_recent_posts_uri(&params.uri) else {
        return Err(JsonRpcError::invalid_params(format!(
            "Unknown resource: {}",
            params.uri
        )));
    };

    let result = recent_posts::read_recent_posts(api, &params.uri, team_name).await;
    to_result(&result)
}
