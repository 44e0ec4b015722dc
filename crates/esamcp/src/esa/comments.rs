use esamcp_core::comment::{
    transform_comment, transform_comment_list, Comment, CommentInput, CommentList,
    CommentListOutput, CommentOutput,
};
use esamcp_core::error::OperationError;
use esamcp_core::normalize::TeamName;
use esamcp_core::post::TransformOptions;
use esamcp_core::response::ToolResult;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{decode, run_tool, team_path, EsaApi, Query};

/// Characters of `body_md` kept in comment lists and newly created comments.
const COMMENT_BODY_LIMIT: usize = 300;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommentInclude {
    Stargazers,
}

impl std::fmt::Display for CommentInclude {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("stargazers")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCommentArgs {
    #[serde(default)]
    pub team_name: TeamName,
    pub comment_id: u64,
    pub include: Option<CommentInclude>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentArgs {
    #[serde(default)]
    pub team_name: TeamName,
    pub post_number: u64,
    pub body_md: String,
    pub user: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentArgs {
    #[serde(default)]
    pub team_name: TeamName,
    pub comment_id: u64,
    pub body_md: String,
    pub user: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommentArgs {
    #[serde(default)]
    pub team_name: TeamName,
    pub comment_id: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPostCommentsArgs {
    #[serde(default)]
    pub team_name: TeamName,
    pub post_number: u64,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTeamCommentsArgs {
    #[serde(default)]
    pub team_name: TeamName,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DeleteCommentOutput {
    pub success: bool,
    pub message: String,
}

fn comment_path(team: &str, comment_id: u64) -> String {
    team_path(team, &format!("/comments/{comment_id}"))
}

async fn get_comment_data<A: EsaApi>(
    api: &A,
    args: &GetCommentArgs,
) -> Result<CommentOutput, OperationError> {
    let team = args.team_name.require()?;
    let query = Query::new().push_opt("include", args.include);
    let comment: Comment = decode(api.get(comment_path(team, args.comment_id), query).await?)?;

    Ok(transform_comment(comment, TransformOptions::default()))
}

pub async fn get_comment<A: EsaApi>(api: &A, args: GetCommentArgs) -> ToolResult {
    run_tool(get_comment_data(api, &args)).await
}

async fn create_comment_data<A: EsaApi>(
    api: &A,
    args: CreateCommentArgs,
) -> Result<CommentOutput, OperationError> {
    let team = args.team_name.require()?;
    let input = CommentInput {
        body_md: args.body_md,
        user: args.user,
    };
    let path = team_path(team, &format!("/posts/{}/comments", args.post_number));
    let comment: Comment = decode(api.post(path, json!({ "comment": input })).await?)?;

    Ok(transform_comment(
        comment,
        TransformOptions::truncate(COMMENT_BODY_LIMIT),
    ))
}

pub async fn create_comment<A: EsaApi>(api: &A, args: CreateCommentArgs) -> ToolResult {
    run_tool(create_comment_data(api, args)).await
}

async fn update_comment_data<A: EsaApi>(
    api: &A,
    args: UpdateCommentArgs,
) -> Result<CommentOutput, OperationError> {
    let team = args.team_name.require()?;
    let input = CommentInput {
        body_md: args.body_md,
        user: args.user,
    };
    let path = comment_path(team, args.comment_id);
    let comment: Comment = decode(api.patch(path, json!({ "comment": input })).await?)?;

    Ok(transform_comment(comment, TransformOptions::default()))
}

pub async fn update_comment<A: EsaApi>(api: &A, args: UpdateCommentArgs) -> ToolResult {
    run_tool(update_comment_data(api, args)).await
}

async fn delete_comment_data<A: EsaApi>(
    api: &A,
    args: &DeleteCommentArgs,
) -> Result<DeleteCommentOutput, OperationError> {
    let team = args.team_name.require()?;
    api.delete(comment_path(team, args.comment_id)).await?;

    Ok(DeleteCommentOutput {
        success: true,
        message: "Comment deleted successfully".to_string(),
    })
}

pub async fn delete_comment<A: EsaApi>(api: &A, args: DeleteCommentArgs) -> ToolResult {
    run_tool(delete_comment_data(api, &args)).await
}

async fn list_comments<A: EsaApi>(
    api: &A,
    path: String,
    page: Option<u32>,
    per_page: Option<u32>,
) -> Result<CommentListOutput, OperationError> {
    let query = Query::new()
        .push_opt("page", page)
        .push_opt("per_page", per_page);
    let list: CommentList = decode(api.get(path, query).await?)?;

    Ok(transform_comment_list(
        list,
        TransformOptions::truncate(COMMENT_BODY_LIMIT),
    ))
}

async fn get_post_comments_data<A: EsaApi>(
    api: &A,
    args: &GetPostCommentsArgs,
) -> Result<CommentListOutput, OperationError> {
    let team = args.team_name.require()?;
    let path = team_path(team, &format!("/posts/{}/comments", args.post_number));

    list_comments(api, path, args.page, args.per_page).await
}

pub async fn get_post_comments<A: EsaApi>(api: &A, args: GetPostCommentsArgs) -> ToolResult {
    run_tool(get_post_comments_data(api, &args)).await
}

async fn get_team_comments_data<A: EsaApi>(
    api: &A,
    args: &GetTeamCommentsArgs,
) -> Result<CommentListOutput, OperationError> {
    let team = args.team_name.require()?;

    list_comments(api, team_path(team, "/comments"), args.page, args.per_page).await
}

pub async fn get_team_comments<A: EsaApi>(api: &A, args: GetTeamCommentsArgs) -> ToolResult {
    run_tool(get_team_comments_data(api, &args)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::esa::mock::{assert_request, MockApi};
    use crate::esa::Method;
    use serde_json::Value;

    fn comment_fixture(id: u64, body: &str) -> Value {
        json!({
            "id": id,
            "body_md": body,
            "body_html": format!("<p>{body}</p>"),
            "created_at": "2024-01-01T00:00:00+09:00",
            "updated_at": "2024-01-01T00:00:00+09:00",
            "post_number": 5,
            "url": format!("https://docs.esa.io/posts/5#comment-{id}"),
            "created_by": {"name": "Bob", "screen_name": "bob", "icon": "https://img.esa.io/b.png"},
            "stargazers_count": 0,
            "star": false
        })
    }

    fn parse(result: &ToolResult) -> Value {
        serde_json::from_str(result.first_text().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_get_comment_with_stargazers() {
        let api = MockApi::new().respond(200, comment_fixture(13, "LGTM"));

        let result = get_comment(
            &api,
            GetCommentArgs {
                team_name: TeamName::new("docs"),
                comment_id: 13,
                include: Some(CommentInclude::Stargazers),
            },
        )
        .await;

        let request = api.request(0);
        assert_request(&request, Method::Get, "/v1/teams/docs/comments/13");
        assert_eq!(request.query.get("include"), Some("stargazers"));
        assert_eq!(parse(&result)["stats"], json!({"stargazers_count": 0, "star": false}));
    }

    #[tokio::test]
    async fn test_create_comment_truncates_body() {
        let long_body = "x".repeat(400);
        let api = MockApi::new().respond(201, comment_fixture(14, &long_body));

        let result = create_comment(
            &api,
            CreateCommentArgs {
                team_name: TeamName::new("docs"),
                post_number: 5,
                body_md: long_body.clone(),
                user: Some("esa_bot".to_string()),
            },
        )
        .await;

        let request = api.request(0);
        assert_request(&request, Method::Post, "/v1/teams/docs/posts/5/comments");
        assert_eq!(
            request.body.unwrap(),
            json!({"comment": {"body_md": long_body, "user": "esa_bot"}})
        );

        let body = parse(&result)["body_md"].as_str().unwrap().to_string();
        assert_eq!(body, format!("{}...", "x".repeat(300)));
    }

    #[tokio::test]
    async fn test_update_comment_keeps_full_body() {
        let long_body = "y".repeat(400);
        let api = MockApi::new().respond(200, comment_fixture(14, &long_body));

        let result = update_comment(
            &api,
            UpdateCommentArgs {
                team_name: TeamName::new("docs"),
                comment_id: 14,
                body_md: long_body.clone(),
                user: None,
            },
        )
        .await;

        let request = api.request(0);
        assert_request(&request, Method::Patch, "/v1/teams/docs/comments/14");
        assert_eq!(request.body.unwrap(), json!({"comment": {"body_md": long_body}}));
        assert_eq!(parse(&result)["body_md"], json!(long_body));
    }

    #[tokio::test]
    async fn test_delete_comment_reports_success() {
        let api = MockApi::new().respond(204, Value::Null);

        let result = delete_comment(
            &api,
            DeleteCommentArgs {
                team_name: TeamName::new("docs"),
                comment_id: 14,
            },
        )
        .await;

        assert_request(&api.request(0), Method::Delete, "/v1/teams/docs/comments/14");
        assert_eq!(
            parse(&result),
            json!({"success": true, "message": "Comment deleted successfully"})
        );
    }

    #[tokio::test]
    async fn test_post_comments_keep_pagination() {
        let api = MockApi::new().respond(
            200,
            json!({
                "comments": [comment_fixture(1, &"z".repeat(301))],
                "prev_page": null,
                "next_page": 2,
                "total_count": 21,
                "page": 1,
                "per_page": 20,
                "max_per_page": 100
            }),
        );

        let result = get_post_comments(
            &api,
            GetPostCommentsArgs {
                team_name: TeamName::new("docs"),
                post_number: 5,
                page: Some(1),
                per_page: Some(20),
            },
        )
        .await;

        let request = api.request(0);
        assert_request(&request, Method::Get, "/v1/teams/docs/posts/5/comments");
        assert_eq!(request.query.get("per_page"), Some("20"));

        let value = parse(&result);
        assert_eq!(value["next_page"], json!(2));
        assert_eq!(value["total_count"], json!(21));
        assert!(value["comments"][0]["body_md"]
            .as_str()
            .unwrap()
            .ends_with("..."));
    }

    #[tokio::test]
    async fn test_team_comments_require_team() {
        let api = MockApi::new();

        let result = get_team_comments(&api, GetTeamCommentsArgs::default()).await;

        assert!(api.requests().is_empty());
        assert_eq!(
            result.first_text(),
            Some(OperationError::MissingTeamName.to_text().as_str())
        );
    }
}
