use serde_json::json;

use super::{team_schema, Tool};

pub fn definitions() -> Vec<Tool> {
    vec![
        Tool::new(
            "esa_get_categories",
            "Get categories for a specific path",
            "Retrieves category information and subcategories for a specific category path, with optional posts and parent categories included",
            team_schema(
                json!({
                    "select": {"type": "string", "description": "Category path to retrieve"},
                    "include": {
                        "type": "string",
                        "description": "Additional information to include",
                        "enum": ["posts", "parent_categories"]
                    },
                    "descendantPosts": {
                        "type": "boolean",
                        "description": "Include descendant posts (only effective with include=posts)"
                    },
                    "page": {"type": "number", "description": "Page number (starts from 1)"},
                    "perPage": {"type": "number", "description": "Number of items per page"}
                }),
                &["select"],
            ),
        ),
        Tool::new(
            "esa_get_top_categories",
            "Get top-level categories",
            "Retrieves all top-level categories for a team",
            team_schema(json!({}), &[]),
        ),
        Tool::new(
            "esa_get_all_category_paths",
            "Get all category paths for organization and structure review",
            "Retrieves all category paths in a team at once to understand the overall category structure. Perfect for category organization, cleanup, migration planning, or finding similar categories. Returns a simple list of paths with post counts, sorted in lexicographic order. Supports filtering (prefix/suffix/match/exact_match) to find categories by pattern. No pagination - gets all categories in one call.",
            team_schema(
                json!({
                    "page": {"type": "number", "description": "Page number (starts from 1)"},
                    "perPage": {"type": "number", "description": "Number of items per page"},
                    "prefix": {"type": "string", "description": "Only paths starting with this value"},
                    "suffix": {"type": "string", "description": "Only paths ending with this value"},
                    "match": {"type": "string", "description": "Only paths containing this value"},
                    "exactMatch": {"type": "string", "description": "Only the path equal to this value"}
                }),
                &[],
            ),
        ),
    ]
}
