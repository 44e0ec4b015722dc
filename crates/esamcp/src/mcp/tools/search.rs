use serde_json::{json, Value};

use super::{team_schema, Tool};

const QUERY_DESCRIPTION: &str = r#"Search query string. Use specific terms, not wildcards like "*". Empty string returns all posts.
## Important Note for Date Queries:
**WARNING: Do NOT use 'after:', 'before:', 'since:', or 'until:' syntax (these are from GitHub/Gmail/pplog).
Use esa-specific date syntax: created:>YYYY-MM-DD, created:<YYYY-MM-DD, updated:>YYYY-MM-DD, updated:<YYYY-MM-DD

## Important Note for Relative Date Queries:
**CRITICAL: Always get today's actual date from the system before processing
relative date queries (e.g., "today", "yesterday", "last week", "recent").
When searching, apply these strategies:
1. Convert concepts to technical terms (e.g., general descriptions → specific property names, method names, or technical keywords)
2. Translate between Japanese and English technical terms (e.g., Japanese concepts → English API/property names)
3. Expand to related technical elements (e.g., one concept → multiple implementation approaches, related technologies, or alternative solutions)
IMPORTANT: Space-separated terms are treated as AND conditions. Use "OR" operator for alternative terms: "word-break OR word-wrap OR overflow-wrap".
Advanced search: "tag:release", "category:dev", "wip:false", "keyword:API", "title:設計書".
Category search: "on:category" (posts directly in category), "in:category" (posts in category and subcategories), "on:/" (uncategorized posts).
For broader results, use OR between related terms rather than listing them with spaces."#;

/// `query`, `page` and `perPage`, shared by post search and help search.
fn paging_properties() -> serde_json::Map<String, Value> {
    let properties = json!({
        "query": {"type": "string", "description": QUERY_DESCRIPTION},
        "page": {"type": "integer", "minimum": 1, "description": "Page number"},
        "perPage": {
            "type": "integer",
            "minimum": 1,
            "maximum": crate::esa::search::MAX_PER_PAGE,
            "description": "Items per page"
        }
    });

    match properties {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}

fn empty_schema() -> Value {
    json!({"type": "object", "properties": {}, "required": []})
}

pub fn definitions() -> Vec<Tool> {
    let mut search_properties = paging_properties();
    search_properties.insert(
        "sort".to_string(),
        json!({
            "type": "string",
            "description": "Sort key",
            "enum": ["updated", "created", "number", "stars", "watches", "comments", "best_match"]
        }),
    );
    search_properties.insert(
        "order".to_string(),
        json!({"type": "string", "description": "Sort direction", "enum": ["desc", "asc"]}),
    );
    search_properties.insert(
        "include".to_string(),
        json!({
            "type": "string",
            "description": "Specify 'comments' to include comments in the response",
            "enum": ["comments"]
        }),
    );

    vec![
        Tool::new(
            "esa_search_posts",
            "Search Posts",
            "Search for posts in esa.io",
            team_schema(Value::Object(search_properties), &["query"]),
        ),
        Tool::new(
            "esa_get_search_options_help",
            "Get esa search options documentation",
            "Get esa search syntax documentation when you need to construct complex\nsearch queries. Use this BEFORE esa_search_posts if you're unsure how to\ntranslate user's search requirements into proper esa query syntax (e.g., date\nranges, tag filters, category searches, advanced operators).",
            empty_schema(),
        ),
        Tool::new(
            "esa_get_markdown_syntax_help",
            "Get esa Markdown syntax documentation",
            "Get esa Markdown and formatting documentation when unsure about syntax.\nUse this BEFORE using any tools with *_md parameters (like esa_create_post,\nesa_update_post, esa_create_comment, esa_update_comment) if you need\nclarification on Markdown syntax, esa-specific extensions, or formatting options.",
            empty_schema(),
        ),
        Tool::new(
            "esa_search_help",
            "Search esa documentation and help",
            "Search esa documentation for features, terminology, and specifications.\nUse this when users mention esa-specific terms, ask about esa functionality,\nor request help with esa workflows that you're not familiar with.",
            json!({
                "type": "object",
                "properties": paging_properties(),
                "required": ["query"]
            }),
        ),
    ]
}
