use esamcp_core::error::OperationError;
use esamcp_core::normalize::{normalize_post_name, TeamName};
use esamcp_core::post::{
    transform_post, OriginalRevision, Post, PostInput, PostOutput, TransformOptions,
};
use esamcp_core::response::ToolResult;
use serde::Deserialize;
use serde_json::json;

use super::{decode, run_tool, team_path, EsaApi, Query};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PostInclude {
    Comments,
}

impl std::fmt::Display for PostInclude {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("comments")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPostArgs {
    #[serde(default)]
    pub team_name: TeamName,
    pub post_number: u64,
    pub include: Option<PostInclude>,
}

fn default_wip() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostArgs {
    #[serde(default)]
    pub team_name: TeamName,
    pub name: String,
    pub body_md: Option<String>,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
    #[serde(default = "default_wip")]
    pub wip: bool,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OriginalRevisionArgs {
    pub body_md: String,
    pub number: u64,
    pub user: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostArgs {
    #[serde(default)]
    pub team_name: TeamName,
    pub post_number: u64,
    pub name: Option<String>,
    pub body_md: Option<String>,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
    pub wip: Option<bool>,
    pub message: Option<String>,
    pub original_revision: Option<OriginalRevisionArgs>,
}

/// Fetch a post as esa returns it.
pub async fn fetch_post<A: EsaApi>(
    api: &A,
    team: &str,
    post_number: u64,
    query: Query,
) -> Result<Post, OperationError> {
    let path = team_path(team, &format!("/posts/{post_number}"));
    decode(api.get(path, query).await?)
}

pub async fn get_post_data<A: EsaApi>(
    api: &A,
    args: &GetPostArgs,
) -> Result<PostOutput, OperationError> {
    let team = args.team_name.require()?;
    let query = Query::new().push_opt("include", args.include);
    let post = fetch_post(api, team, args.post_number, query).await?;

    Ok(transform_post(post, TransformOptions::default()))
}

pub async fn get_post<A: EsaApi>(api: &A, args: GetPostArgs) -> ToolResult {
    run_tool(get_post_data(api, &args)).await
}

pub async fn create_post_data<A: EsaApi>(
    api: &A,
    args: CreatePostArgs,
) -> Result<PostOutput, OperationError> {
    let team = args.team_name.require()?;
    let parts = normalize_post_name(Some(args.name), args.category);

    let input = PostInput {
        name: parts.name,
        body_md: args.body_md,
        tags: args.tags,
        category: parts.category,
        wip: Some(args.wip),
        message: args.message,
        original_revision: None,
    };

    let post: Post = decode(
        api.post(team_path(team, "/posts"), json!({ "post": input }))
            .await?,
    )?;
    Ok(transform_post(post, TransformOptions::default()))
}

pub async fn create_post<A: EsaApi>(api: &A, args: CreatePostArgs) -> ToolResult {
    run_tool(create_post_data(api, args)).await
}

pub async fn update_post_data<A: EsaApi>(
    api: &A,
    args: UpdatePostArgs,
) -> Result<PostOutput, OperationError> {
    let team = args.team_name.require()?;
    let parts = normalize_post_name(args.name, args.category);

    let input = PostInput {
        name: parts.name,
        body_md: args.body_md,
        tags: args.tags,
        category: parts.category,
        wip: args.wip,
        message: args.message,
        original_revision: args.original_revision.map(|revision| OriginalRevision {
            body_md: revision.body_md,
            number: revision.number,
            user: revision.user,
        }),
    };

    let path = team_path(team, &format!("/posts/{}", args.post_number));
    let post: Post = decode(api.patch(path, json!({ "post": input })).await?)?;
    Ok(transform_post(post, TransformOptions::default()))
}

pub async fn update_post<A: EsaApi>(api: &A, args: UpdatePostArgs) -> ToolResult {
    run_tool(update_post_data(api, args)).await
}
