use serde_json::json;

use super::{team_schema, Tool};

pub fn definitions() -> Vec<Tool> {
    vec![
        Tool::new(
            "esa_get_teams",
            "Get user's accessible esa teams",
            "Retrieves a list of esa teams that the user has access to.",
            json!({
                "type": "object",
                "properties": {
                    "page": {"type": "number", "description": "Page number (starts from 1)"},
                    "perPage": {"type": "number", "description": "Number of items per page"},
                    "role": {
                        "type": "string",
                        "description": "Filter by role",
                        "enum": ["member", "owner"]
                    }
                },
                "required": []
            }),
        ),
        Tool::new(
            "esa_get_team_stats",
            "Get team statistics",
            "Retrieves team statistics including member count, posts count (total/WIP/shipped), comments, stars, watches, and daily/weekly/monthly active users",
            team_schema(json!({}), &[]),
        ),
        Tool::new(
            "esa_get_team_tags",
            "Get team tags",
            "Retrieves all tags used in posts within a team, along with the count of posts for each tag",
            team_schema(
                json!({
                    "page": {"type": "number", "description": "Page number (starts from 1)"},
                    "perPage": {"type": "number", "description": "Number of items per page"}
                }),
                &[],
            ),
        ),
        Tool::new(
            "esa_get_team_members",
            "Get team members",
            "Retrieves all members of a team with their roles and profile information",
            team_schema(
                json!({
                    "page": {"type": "number", "description": "Page number (starts from 1)"},
                    "perPage": {"type": "number", "description": "Number of items per page"},
                    "sort": {
                        "type": "string",
                        "description": "Sort criteria",
                        "enum": ["posts_count", "joined", "last_accessed"]
                    },
                    "order": {
                        "type": "string",
                        "description": "Sort order",
                        "enum": ["desc", "asc"]
                    }
                }),
                &[],
            ),
        ),
    ]
}
