use serde_json::json;

use super::{team_schema, Tool};

const USER_DESCRIPTION: &str = "Comment author's screen_name (owner permission required)";

pub fn definitions() -> Vec<Tool> {
    vec![
        Tool::new(
            "esa_get_comment",
            "Get a specific comment",
            "Retrieves a specific comment by comment ID, with optional stargazers included.",
            team_schema(
                json!({
                    "commentId": {"type": "number", "description": "The comment ID to retrieve"},
                    "include": {
                        "type": "string",
                        "description": "Specify 'stargazers' to include stargazers in the response",
                        "enum": ["stargazers"]
                    }
                }),
                &["commentId"],
            ),
        ),
        Tool::new(
            "esa_create_comment",
            "Create a new comment on a post",
            "Creates a new comment on an existing post in an esa team.",
            team_schema(
                json!({
                    "postNumber": {"type": "number", "description": "The post number to comment on"},
                    "bodyMd": {"type": "string", "description": "The comment content in Markdown format"},
                    "user": {"type": "string", "description": USER_DESCRIPTION}
                }),
                &["postNumber", "bodyMd"],
            ),
        ),
        Tool::new(
            "esa_update_comment",
            "Update an existing comment",
            "Updates an existing comment in an esa team by comment ID.",
            team_schema(
                json!({
                    "commentId": {"type": "number", "description": "The comment ID to update"},
                    "bodyMd": {"type": "string", "description": "The updated comment content in Markdown format"},
                    "user": {"type": "string", "description": USER_DESCRIPTION}
                }),
                &["commentId", "bodyMd"],
            ),
        ),
        Tool::new(
            "esa_delete_comment",
            "Delete a comment",
            "Deletes a comment from an esa team by comment ID.",
            team_schema(
                json!({
                    "commentId": {"type": "number", "description": "The comment ID to delete"}
                }),
                &["commentId"],
            ),
        ),
        Tool::new(
            "esa_get_post_comments",
            "Get comments for a specific post",
            "Retrieves a list of comments for a specific post with pagination support.",
            team_schema(
                json!({
                    "postNumber": {"type": "number", "description": "The post number to get comments for"},
                    "page": {"type": "number", "description": "Page number (starts from 1)"},
                    "perPage": {"type": "number", "description": "Number of items per page"}
                }),
                &["postNumber"],
            ),
        ),
        Tool::new(
            "esa_get_team_comments",
            "Get team comments",
            "Retrieves a list of comments in a team with pagination support.",
            team_schema(
                json!({
                    "page": {"type": "number", "description": "Page number (starts from 1)"},
                    "perPage": {"type": "number", "description": "Number of items per page"}
                }),
                &[],
            ),
        ),
    ]
}
