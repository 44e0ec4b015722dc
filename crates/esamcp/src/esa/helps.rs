//! Help tools backed by the public esa documentation team

use esamcp_core::normalize::TeamName;
use esamcp_core::response::ToolResult;
use serde::Deserialize;

use super::posts::{get_post, GetPostArgs};
use super::search::{search_posts, validate_paging, PostSort, SearchPostsArgs};
use super::EsaApi;

pub const HELP_TEAM: &str = "docs";
pub const SEARCH_OPTIONS_POST_NUMBER: u64 = 104;
pub const MARKDOWN_SYNTAX_POST_NUMBER: u64 = 49;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHelpArgs {
    pub query: String,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl SearchHelpArgs {
    pub fn validate(&self) -> Result<(), String> {
        validate_paging(self.page, self.per_page)
    }
}

async fn help_post<A: EsaApi>(api: &A, post_number: u64) -> ToolResult {
    get_post(
        api,
        GetPostArgs {
            team_name: TeamName::new(HELP_TEAM),
            post_number,
            include: None,
        },
    )
    .await
}

pub async fn get_search_options_help<A: EsaApi>(api: &A) -> ToolResult {
    help_post(api, SEARCH_OPTIONS_POST_NUMBER).await
}

pub async fn get_markdown_syntax_help<A: EsaApi>(api: &A) -> ToolResult {
    help_post(api, MARKDOWN_SYNTAX_POST_NUMBER).await
}

/// Search the documentation team, best matches first.
pub async fn search_help<A: EsaApi>(api: &A, args: SearchHelpArgs) -> ToolResult {
    search_posts(
        api,
        SearchPostsArgs {
            team_name: TeamName::new(HELP_TEAM),
            query: args.query,
            sort: Some(PostSort::BestMatch),
            order: None,
            page: args.page,
            per_page: args.per_page,
            include: None,
        },
    )
    .await
}
