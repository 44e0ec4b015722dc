use esamcp_core::error::OperationError;
use esamcp_core::normalize::TeamName;
use esamcp_core::post::{transform_post_list, PostList, PostListOutput, TransformOptions};
use esamcp_core::response::ResourceResult;
use esamcp_core::team::{recent_posts_resources, ResourceDescriptor};

use super::teams::{list_teams, GetTeamsArgs};
use super::{decode, run_resource, team_path, EsaApi, Order, Query};

const RECENT_BODY_LIMIT: usize = 500;

async fn recent_posts_data<A: EsaApi>(
    api: &A,
    team_name: &TeamName,
) -> Result<PostListOutput, OperationError> {
    let team = team_name.require()?;
    let query = Query::new()
        .push("sort", "updated")
        .push("order", Order::Desc);

    let list: PostList = decode(api.get(team_path(team, "/posts"), query).await?)?;
    Ok(transform_post_list(
        list,
        TransformOptions::truncate(RECENT_BODY_LIMIT),
    ))
}

/// Read `esa://teams/{teamName}/posts/recent`.
pub async fn read_recent_posts<A: EsaApi>(api: &A, uri: &str, team_name: &str) -> ResourceResult {
    run_resource(uri, recent_posts_data(api, &TeamName::new(team_name))).await
}

/// One recent posts resource per accessible team; nothing when teams cannot be listed.
pub async fn list_recent_posts_resources<A: EsaApi>(api: &A) -> Vec<ResourceDescriptor> {
    match list_teams(api, &GetTeamsArgs::default()).await {
        Ok(list) => recent_posts_resources(&list.teams),
        Err(error) => {
            log::error!("Failed to list teams: {error}");
            Vec::new()
        }
    }
}
