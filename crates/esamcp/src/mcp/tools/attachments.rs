use serde_json::json;

use super::{team_schema, Tool};

pub fn definitions() -> Vec<Tool> {
    vec![Tool::new(
        "esa_get_attachment",
        "Get attachment file from esa",
        "Retrieves attachment files from esa with signed URLs. For supported images (JPEG, PNG, GIF, WebP) under 30MB, returns base64-encoded data. Text files are returned as text and other files under 30MB as annotated base64. Larger files, or any file when forceSignedUrl is true, are returned as signed URLs. Pass several URLs to fetch them in one call; each gets its own content item, in order.",
        team_schema(
            json!({
                "url": {
                    "anyOf": [
                        {"type": "string"},
                        {"type": "array", "items": {"type": "string"}, "minItems": 1}
                    ],
                    "description": "Attachment URL or list of URLs. Each can be a full URL (https://files.esa.io/..., https://dl.esa.io/...) or a path (/uploads/...)"
                },
                "forceSignedUrl": {
                    "type": "boolean",
                    "description": "If true, always return signed URLs instead of file contents. Default is false."
                }
            }),
            &["url"],
        ),
    )]
}
