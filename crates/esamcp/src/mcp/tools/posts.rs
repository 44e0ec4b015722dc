use serde_json::json;

use super::{team_schema, Tool};

const WIP_DESCRIPTION: &str = "Whether the post is Work In Progress. Set to false to ship it (mark as complete and ready to be published)";

pub fn definitions() -> Vec<Tool> {
    vec![
        Tool::new(
            "esa_get_post",
            "Get a specific esa post",
            "Retrieves a specific post from an esa team by post number, with optional comments included.",
            team_schema(
                json!({
                    "postNumber": {"type": "number", "description": "The post number to retrieve"},
                    "include": {
                        "type": "string",
                        "description": "Specify 'comments' to include comments in the response",
                        "enum": ["comments"]
                    }
                }),
                &["postNumber"],
            ),
        ),
        Tool::new(
            "esa_create_post",
            "Create a new esa post",
            "Creates a new post in an esa team with optional tags, category, and WIP status.",
            team_schema(
                json!({
                    "name": {"type": "string", "description": "The post name (title)"},
                    "bodyMd": {"type": "string", "description": "The post content in Markdown format"},
                    "tags": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Tags for the post"
                    },
                    "category": {"type": "string", "description": "Category path (e.g., 'dev/docs')"},
                    "wip": {"type": "boolean", "default": true, "description": WIP_DESCRIPTION},
                    "message": {"type": "string", "description": "Update message for the post"}
                }),
                &["name"],
            ),
        ),
        Tool::new(
            "esa_update_post",
            "Update an existing esa post",
            "Updates an existing post in an esa team by post number. You can update the title, content, tags, category, and WIP status. To ship a post (mark as complete), set wip to false - this is preferred over using esa_ship_post when updating other fields simultaneously.",
            team_schema(
                json!({
                    "postNumber": {"type": "number", "description": "The post number to update"},
                    "name": {"type": "string", "description": "The post name (title)"},
                    "bodyMd": {"type": "string", "description": "The post content in Markdown format"},
                    "tags": {
                        "type": "array",
                        "items": {"type": "string"},
                        "description": "Tags for the post"
                    },
                    "category": {"type": "string", "description": "Category path (e.g., 'dev/docs')"},
                    "wip": {"type": "boolean", "description": WIP_DESCRIPTION},
                    "message": {"type": "string", "description": "Update message for the post"},
                    "originalRevision": {
                        "type": "object",
                        "description": "Original revision to check for conflicts",
                        "properties": {
                            "bodyMd": {"type": "string"},
                            "number": {"type": "number"},
                            "user": {"type": "string"}
                        },
                        "required": ["bodyMd", "number", "user"]
                    }
                }),
                &["postNumber"],
            ),
        ),
    ]
}
