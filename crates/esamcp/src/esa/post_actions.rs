//! Composite post actions built on the post operations
//!
//! Archive and ship are updates with a computed category or WIP flag;
//! duplicate turns esa's "new post" template into a fresh WIP post.

use esamcp_core::error::OperationError;
use esamcp_core::normalize::TeamName;
use esamcp_core::post::{PostOutput, PostTemplateResponse};
use esamcp_core::response::ToolResult;
use serde::{Deserialize, Serialize};

use super::posts::{create_post_data, fetch_post, update_post_data, CreatePostArgs, UpdatePostArgs};
use super::{decode, run_tool, team_path, EsaApi, Query};

const ARCHIVE_CATEGORY: &str = "Archived";
const ARCHIVE_PREFIX: &str = "Archived/";
const DEFAULT_ARCHIVE_MESSAGE: &str = "Archive post";
const SHIP_MESSAGE: &str = "Ship It!";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchivePostArgs {
    #[serde(default)]
    pub team_name: TeamName,
    pub post_number: u64,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipPostArgs {
    #[serde(default)]
    pub team_name: TeamName,
    pub post_number: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicatePostArgs {
    #[serde(default)]
    pub team_name: TeamName,
    pub post_number: u64,
    /// Team receiving the copy; defaults to the source team.
    #[serde(default)]
    pub target_team_name: TeamName,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ArchiveOutcome {
    AlreadyArchived { message: String, category: String },
    Archived(PostOutput),
}

/// Category a post moves to when archived, `None` if it already lives there.
///
/// Only `Archived/...` counts as archived; a post filed directly under
/// `Archived` is moved to `Archived/Archived`.
pub fn archived_category(current: &str) -> Option<String> {
    if current.starts_with(ARCHIVE_PREFIX) {
        None
    } else if current.is_empty() {
        Some(ARCHIVE_CATEGORY.to_string())
    } else {
        Some(format!("{ARCHIVE_PREFIX}{current}"))
    }
}

async fn archive_post_data<A: EsaApi>(
    api: &A,
    args: ArchivePostArgs,
) -> Result<ArchiveOutcome, OperationError> {
    let team = args.team_name.require()?;
    let post = fetch_post(api, team, args.post_number, Query::new()).await?;
    let current = post.category.unwrap_or_default();

    let Some(category) = archived_category(&current) else {
        return Ok(ArchiveOutcome::AlreadyArchived {
            message: "Post is already archived".to_string(),
            category: current,
        });
    };

    let updated = update_post_data(
        api,
        UpdatePostArgs {
            team_name: args.team_name.clone(),
            post_number: args.post_number,
            category: Some(category),
            message: Some(
                args.message
                    .filter(|message| !message.is_empty())
                    .unwrap_or_else(|| DEFAULT_ARCHIVE_MESSAGE.to_string()),
            ),
            ..Default::default()
        },
    )
    .await?;

    Ok(ArchiveOutcome::Archived(updated))
}

pub async fn archive_post<A: EsaApi>(api: &A, args: ArchivePostArgs) -> ToolResult {
    run_tool(archive_post_data(api, args)).await
}

async fn ship_post_data<A: EsaApi>(
    api: &A,
    args: ShipPostArgs,
) -> Result<PostOutput, OperationError> {
    args.team_name.require()?;

    update_post_data(
        api,
        UpdatePostArgs {
            team_name: args.team_name,
            post_number: args.post_number,
            wip: Some(false),
            message: Some(SHIP_MESSAGE.to_string()),
            ..Default::default()
        },
    )
    .await
}

pub async fn ship_post<A: EsaApi>(api: &A, args: ShipPostArgs) -> ToolResult {
    run_tool(ship_post_data(api, args)).await
}

async fn duplicate_post_data<A: EsaApi>(
    api: &A,
    args: DuplicatePostArgs,
) -> Result<PostOutput, OperationError> {
    let team = args.team_name.require()?;
    let query = Query::new().push("parent_post_id", args.post_number);
    let template: PostTemplateResponse =
        decode(api.get(team_path(team, "/posts/new"), query).await?)?;

    let target = if args.target_team_name.is_empty() {
        args.team_name
    } else {
        args.target_team_name
    };

    create_post_data(
        api,
        CreatePostArgs {
            team_name: target,
            name: template.post.name,
            body_md: template.post.body_md,
            tags: None,
            category: None,
            wip: true,
            message: None,
        },
    )
    .await
}

pub async fn duplicate_post<A: EsaApi>(api: &A, args: DuplicatePostArgs) -> ToolResult {
    run_tool(duplicate_post_data(api, args)).await
}
