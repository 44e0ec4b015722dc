use esamcp_core::error::OperationError;
use esamcp_core::normalize::TeamName;
use esamcp_core::response::ToolResult;
use esamcp_core::team::{transform_team_list, TeamList, TeamListOutput};
use serde::Deserialize;
use serde_json::Value;

use super::{decode, run_tool, team_path, EsaApi, Order, Query};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Member,
    Owner,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Role::Member => "member",
            Role::Owner => "owner",
        })
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MemberSort {
    PostsCount,
    Joined,
    LastAccessed,
}

impl std::fmt::Display for MemberSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            MemberSort::PostsCount => "posts_count",
            MemberSort::Joined => "joined",
            MemberSort::LastAccessed => "last_accessed",
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTeamsArgs {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamArgs {
    #[serde(default)]
    pub team_name: TeamName,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTeamTagsArgs {
    #[serde(default)]
    pub team_name: TeamName,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTeamMembersArgs {
    #[serde(default)]
    pub team_name: TeamName,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub sort: Option<MemberSort>,
    pub order: Option<Order>,
}

/// Teams the token can access, each reduced to `url`, `name` and `description`.
pub async fn list_teams<A: EsaApi>(
    api: &A,
    args: &GetTeamsArgs,
) -> Result<TeamListOutput, OperationError> {
    let query = Query::new()
        .push_opt("page", args.page)
        .push_opt("per_page", args.per_page)
        .push_opt("role", args.role);

    let list: TeamList = decode(api.get("/v1/teams".to_string(), query).await?)?;
    Ok(transform_team_list(list))
}

pub async fn get_teams<A: EsaApi>(api: &A, args: GetTeamsArgs) -> ToolResult {
    run_tool(list_teams(api, &args)).await
}

async fn team_data<A: EsaApi>(
    api: &A,
    team_name: &TeamName,
    rest: &str,
    query: Query,
) -> Result<Value, OperationError> {
    let team = team_name.require()?;
    api.get(team_path(team, rest), query).await
}

pub async fn get_team_stats<A: EsaApi>(api: &A, args: TeamArgs) -> ToolResult {
    run_tool(team_data(api, &args.team_name, "/stats", Query::new())).await
}

pub async fn get_team_tags<A: EsaApi>(api: &A, args: GetTeamTagsArgs) -> ToolResult {
    let query = Query::new()
        .push_opt("page", args.page)
        .push_opt("per_page", args.per_page);

    run_tool(team_data(api, &args.team_name, "/tags", query)).await
}

pub async fn get_team_members<A: EsaApi>(api: &A, args: GetTeamMembersArgs) -> ToolResult {
    let query = Query::new()
        .push_opt("page", args.page)
        .push_opt("per_page", args.per_page)
        .push_opt("sort", args.sort)
        .push_opt("order", args.order);

    run_tool(team_data(api, &args.team_name, "/members", query)).await
}
