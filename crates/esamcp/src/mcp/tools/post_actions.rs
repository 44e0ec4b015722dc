use serde_json::json;

use super::{team_schema, Tool};

pub fn definitions() -> Vec<Tool> {
    vec![
        Tool::new(
            "esa_archive_post",
            "Archive a post",
            "Archives a post by moving it to the Archived/ category. If the post is in 'dev/docs', it becomes 'Archived/dev/docs'. Posts without category go to 'Archived'.",
            team_schema(
                json!({
                    "postNumber": {"type": "number", "description": "The post number to archive"},
                    "message": {"type": "string", "description": "Archive message for the post"}
                }),
                &["postNumber"],
            ),
        ),
        Tool::new(
            "esa_ship_post",
            "Ship a post",
            "Ships a post by setting wip to false. This marks the post as complete and ready to be published. Use this only when you need to ship without making other changes - if you're also updating title, content, or other fields, use esa_update_post with wip: false instead.",
            team_schema(
                json!({
                    "postNumber": {"type": "number", "description": "The post number to ship"}
                }),
                &["postNumber"],
            ),
        ),
        Tool::new(
            "esa_duplicate_post",
            "Prepare a post for duplication",
            "Prepares a post for duplication by retrieving its name and body_md content. Returns the name and body_md that can be used with esa_create_post to create a duplicate of the original post.",
            team_schema(
                json!({
                    "postNumber": {
                        "type": "number",
                        "description": "The source post number to prepare for duplication"
                    },
                    "targetTeamName": {"type": "string", "description": "The name of the esa team"}
                }),
                &["postNumber"],
            ),
        ),
    ]
}
