use esamcp_core::error::OperationError;
use esamcp_core::normalize::{normalize_search_query, TeamName};
use esamcp_core::post::{transform_posts, PostList, TransformOptions};
use esamcp_core::response::{format_tool_response, ToolResult};
use esamcp_core::search::{is_and_query, or_search_suggestion};
use serde::Deserialize;

use super::posts::PostInclude;
use super::{decode, run_tool_content, team_path, EsaApi, Order, Query};

/// Characters of `body_md` kept for every search hit.
const SEARCH_BODY_LIMIT: usize = 500;

/// Largest `perPage` the esa API accepts.
pub const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PostSort {
    Updated,
    Created,
    Number,
    Stars,
    Watches,
    Comments,
    BestMatch,
}

impl std::fmt::Display for PostSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            PostSort::Updated => "updated",
            PostSort::Created => "created",
            PostSort::Number => "number",
            PostSort::Stars => "stars",
            PostSort::Watches => "watches",
            PostSort::Comments => "comments",
            PostSort::BestMatch => "best_match",
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPostsArgs {
    #[serde(default)]
    pub team_name: TeamName,
    pub query: String,
    pub sort: Option<PostSort>,
    pub order: Option<Order>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub include: Option<PostInclude>,
}

impl SearchPostsArgs {
    /// Reject paging values the API would refuse.
    pub fn validate(&self) -> Result<(), String> {
        validate_paging(self.page, self.per_page)
    }
}

pub fn validate_paging(page: Option<u32>, per_page: Option<u32>) -> Result<(), String> {
    if page == Some(0) {
        return Err("page must be a positive integer".to_string());
    }

    match per_page {
        Some(per_page) if !(1..=MAX_PER_PAGE).contains(&per_page) => Err(format!(
            "perPage must be between 1 and {MAX_PER_PAGE}"
        )),
        _ => Ok(()),
    }
}

async fn search_posts_data<A: EsaApi>(
    api: &A,
    args: &SearchPostsArgs,
) -> Result<ToolResult, OperationError> {
    let team = args.team_name.require()?;
    let query = normalize_search_query(&args.query);

    let params = Query::new()
        .push("q", &query)
        .push_opt("sort", args.sort)
        .push_opt("order", args.order)
        .push_opt("page", args.page)
        .push_opt("per_page", args.per_page)
        .push_opt("include", args.include);

    let list: PostList = decode(api.get(team_path(team, "/posts"), params).await?)?;

    if list.posts.is_empty() && is_and_query(&query) {
        return Ok(ToolResult::text(or_search_suggestion(&query)));
    }

    let posts = transform_posts(list.posts, TransformOptions::truncate(SEARCH_BODY_LIMIT));
    Ok(format_tool_response(&posts))
}

/// Search posts; an empty AND search answers with an OR suggestion instead.
pub async fn search_posts<A: EsaApi>(api: &A, args: SearchPostsArgs) -> ToolResult {
    run_tool_content(search_posts_data(api, &args)).await
}
