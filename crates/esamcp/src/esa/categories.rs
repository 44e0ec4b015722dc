use esamcp_core::category::{transform_category_list, CategoryList, CategoryListOutput};
use esamcp_core::error::OperationError;
use esamcp_core::normalize::TeamName;
use esamcp_core::response::ToolResult;
use serde::Deserialize;
use serde_json::Value;

use super::{decode, run_tool, team_path, EsaApi, Query};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CategoryInclude {
    Posts,
    ParentCategories,
}

impl std::fmt::Display for CategoryInclude {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            CategoryInclude::Posts => "posts",
            CategoryInclude::ParentCategories => "parent_categories",
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCategoriesArgs {
    #[serde(default)]
    pub team_name: TeamName,
    /// Category path to list children of.
    pub select: String,
    pub include: Option<CategoryInclude>,
    pub descendant_posts: Option<bool>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTopCategoriesArgs {
    #[serde(default)]
    pub team_name: TeamName,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAllCategoryPathsArgs {
    #[serde(default)]
    pub team_name: TeamName,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    #[serde(rename = "match")]
    pub match_: Option<String>,
    pub exact_match: Option<String>,
}

async fn category_list<A: EsaApi>(
    api: &A,
    team_name: &TeamName,
    rest: &str,
    query: Query,
) -> Result<CategoryListOutput, OperationError> {
    let team = team_name.require()?;
    let list: CategoryList = decode(api.get(team_path(team, rest), query).await?)?;

    Ok(transform_category_list(list))
}

pub async fn get_categories<A: EsaApi>(api: &A, args: GetCategoriesArgs) -> ToolResult {
    let query = Query::new()
        .push("select", &args.select)
        .push_opt("include", args.include)
        .push_opt("descendant_posts", args.descendant_posts)
        .push_opt("page", args.page)
        .push_opt("per_page", args.per_page);

    run_tool(category_list(api, &args.team_name, "/categories", query)).await
}

pub async fn get_top_categories<A: EsaApi>(api: &A, args: GetTopCategoriesArgs) -> ToolResult {
    run_tool(category_list(
        api,
        &args.team_name,
        "/categories/top",
        Query::new(),
    ))
    .await
}

async fn category_paths_data<A: EsaApi>(
    api: &A,
    args: GetAllCategoryPathsArgs,
) -> Result<Value, OperationError> {
    let team = args.team_name.require()?;
    let query = Query::new()
        .push("v", 2)
        .push_opt("page", args.page)
        .push_opt("per_page", args.per_page)
        .push_opt("prefix", args.prefix)
        .push_opt("suffix", args.suffix)
        .push_opt("match", args.match_)
        .push_opt("exact_match", args.exact_match);

    api.get(team_path(team, "/categories/paths"), query).await
}

pub async fn get_all_category_paths<A: EsaApi>(
    api: &A,
    args: GetAllCategoryPathsArgs,
) -> ToolResult {
    run_tool(category_paths_data(api, args)).await
}
