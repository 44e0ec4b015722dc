//! Transformation functions for esa post responses

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Post author as returned by esa.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub myself: Option<bool>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub screen_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Post response from the esa API
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Post {
    #[serde(default)]
    pub number: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub wip: bool,
    #[serde(default)]
    pub body_md: Option<String>,
    #[serde(default)]
    pub body_html: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub revision_number: u64,
    #[serde(default)]
    pub created_by: Option<User>,
    #[serde(default)]
    pub updated_by: Option<User>,
    #[serde(default)]
    pub star: bool,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub watch: bool,
    #[serde(default)]
    pub watchers_count: u64,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default)]
    pub tasks_count: u64,
    #[serde(default)]
    pub done_tasks_count: u64,
}

/// Paginated list of posts; everything besides `posts` is kept untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostList {
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Template returned by `GET /posts/new`, used to duplicate a post.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PostTemplate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub body_md: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostTemplateResponse {
    pub post: PostTemplate,
}

/// WIP flag relabeled for agents.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum WipLabel {
    #[serde(rename = "WIP")]
    Wip,
    Shipped,
}

impl From<bool> for WipLabel {
    fn from(wip: bool) -> Self {
        if wip {
            WipLabel::Wip
        } else {
            WipLabel::Shipped
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PostStats {
    pub tasks_count: u64,
    pub done_tasks_count: u64,
    pub comments_count: u64,
    pub stargazers_count: u64,
    pub watchers_count: u64,
}

/// Compact post handed to agents.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PostOutput {
    pub url: String,
    pub wip: WipLabel,
    pub kind: String,
    pub category_and_title_and_tags: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_md: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub created_by: Option<User>,
    pub updated_by: Option<User>,
    pub stats: PostStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostListOutput {
    pub posts: Vec<PostOutput>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Options shared by the post and comment transformers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformOptions {
    /// Maximum number of characters of `body_md` to keep.
    pub truncate_body: Option<usize>,
}

impl TransformOptions {
    pub fn truncate(limit: usize) -> Self {
        Self {
            truncate_body: Some(limit),
        }
    }
}

/// Cut `body` to `limit` characters and append `...`, only when it is longer.
///
/// Missing or empty bodies, and a zero limit, leave the body as it is.
pub fn truncate_body(body: Option<String>, limit: Option<usize>) -> Option<String> {
    match (body, limit) {
        (Some(body), Some(limit)) if limit > 0 && body.chars().count() > limit => {
            let head: String = body.chars().take(limit).collect();
            Some(format!("{head}..."))
        }
        (body, _) => body,
    }
}

/// Convert an esa post into the compact agent-facing shape.
///
/// Name, tags, category, revision and star/watch flags are dropped on
/// purpose; `full_name` already carries category, title and tags.
pub fn transform_post(post: Post, options: TransformOptions) -> PostOutput {
    PostOutput {
        url: post.url,
        wip: WipLabel::from(post.wip),
        kind: post.kind,
        category_and_title_and_tags: post.full_name,
        body_md: truncate_body(post.body_md, options.truncate_body),
        created_at: post.created_at,
        updated_at: post.updated_at,
        created_by: post.created_by,
        updated_by: post.updated_by,
        stats: PostStats {
            tasks_count: post.tasks_count,
            done_tasks_count: post.done_tasks_count,
            comments_count: post.comments_count,
            stargazers_count: post.stargazers_count,
            watchers_count: post.watchers_count,
        },
    }
}

pub fn transform_posts(posts: Vec<Post>, options: TransformOptions) -> Vec<PostOutput> {
    posts
        .into_iter()
        .map(|post| transform_post(post, options))
        .collect()
}

pub fn transform_post_list(list: PostList, options: TransformOptions) -> PostListOutput {
    PostListOutput {
        posts: transform_posts(list.posts, options),
        rest: list.rest,
    }
}

/// Original revision sent with an update to detect conflicting edits.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct OriginalRevision {
    pub body_md: String,
    pub number: u64,
    pub user: String,
}

/// Body of `POST /posts` and `PATCH /posts/{number}`; unset keys are omitted.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PostInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_md: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wip: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_revision: Option<OriginalRevision>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_post(body: Option<&str>, wip: bool) -> Post {
        Post {
            number: 1,
            name: "Getting Started".to_string(),
            full_name: "dev/docs/Getting Started #guide".to_string(),
            wip,
            body_md: body.map(str::to_string),
            body_html: Some("<p>html</p>".to_string()),
            created_at: "2024-01-01T00:00:00+09:00".to_string(),
            updated_at: "2024-01-02T00:00:00+09:00".to_string(),
            message: Some("Update post".to_string()),
            url: "https://docs.esa.io/posts/1".to_string(),
            kind: "stock".to_string(),
            tags: vec!["guide".to_string()],
            category: Some("dev/docs".to_string()),
            revision_number: 3,
            created_by: Some(User {
                myself: Some(true),
                name: "Alice".to_string(),
                screen_name: "alice".to_string(),
                icon: None,
            }),
            updated_by: None,
            star: true,
            stargazers_count: 4,
            watch: false,
            watchers_count: 2,
            comments_count: 5,
            tasks_count: 3,
            done_tasks_count: 1,
        }
    }

    #[test]
    fn test_transform_post_basic() {
        // Arrange
        let post = create_post(Some("# Hello"), false);

        // Act
        let output = transform_post(post, TransformOptions::default());

        // Assert
        assert_eq!(output.url, "https://docs.esa.io/posts/1");
        assert_eq!(output.wip, WipLabel::Shipped);
        assert_eq!(output.kind, "stock");
        assert_eq!(
            output.category_and_title_and_tags,
            "dev/docs/Getting Started #guide"
        );
        assert_eq!(output.body_md.as_deref(), Some("# Hello"));
        assert_eq!(output.stats.tasks_count, 3);
        assert_eq!(output.stats.done_tasks_count, 1);
        assert_eq!(output.stats.comments_count, 5);
        assert_eq!(output.stats.stargazers_count, 4);
        assert_eq!(output.stats.watchers_count, 2);
    }

    #[test]
    fn test_transform_post_wip_labels() {
        let wip = transform_post(create_post(None, true), TransformOptions::default());
        let shipped = transform_post(create_post(None, false), TransformOptions::default());

        assert_eq!(serde_json::to_value(&wip).unwrap()["wip"], json!("WIP"));
        assert_eq!(
            serde_json::to_value(&shipped).unwrap()["wip"],
            json!("Shipped")
        );
    }

    #[test]
    fn test_transform_post_drops_verbose_fields() {
        let output = transform_post(create_post(Some("x"), false), TransformOptions::default());
        let value = serde_json::to_value(&output).unwrap();
        let object = value.as_object().unwrap();

        for dropped in [
            "name",
            "full_name",
            "tags",
            "category",
            "revision_number",
            "star",
            "watch",
            "body_html",
            "number",
        ] {
            assert!(!object.contains_key(dropped), "{dropped} should be dropped");
        }
        assert_eq!(
            object.keys().collect::<Vec<_>>(),
            vec![
                "url",
                "wip",
                "kind",
                "category_and_title_and_tags",
                "body_md",
                "created_at",
                "updated_at",
                "created_by",
                "updated_by",
                "stats"
            ]
        );
    }

    #[test]
    fn test_truncate_body_only_when_longer() {
        assert_eq!(
            truncate_body(Some("abcdef".to_string()), Some(3)),
            Some("abc...".to_string())
        );
        assert_eq!(
            truncate_body(Some("abc".to_string()), Some(3)),
            Some("abc".to_string())
        );
        assert_eq!(
            truncate_body(Some("ab".to_string()), Some(3)),
            Some("ab".to_string())
        );
        assert_eq!(
            truncate_body(Some("abcdef".to_string()), None),
            Some("abcdef".to_string())
        );
    }

    #[test]
    fn test_truncate_body_never_invents_ellipsis() {
        assert_eq!(truncate_body(None, Some(3)), None);
        assert_eq!(
            truncate_body(Some(String::new()), Some(3)),
            Some(String::new())
        );
        assert_eq!(
            truncate_body(Some("abcdef".to_string()), Some(0)),
            Some("abcdef".to_string())
        );
    }

    #[test]
    fn test_truncate_body_counts_characters() {
        assert_eq!(
            truncate_body(Some("日本語のテキスト".to_string()), Some(3)),
            Some("日本語...".to_string())
        );
    }

    #[test]
    fn test_transform_post_truncates_body() {
        let body = "a".repeat(600);
        let output = transform_post(create_post(Some(&body), false), TransformOptions::truncate(500));

        let truncated = output.body_md.unwrap();
        assert_eq!(truncated.len(), 503);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_transform_post_list_keeps_pagination() {
        let list: PostList = serde_json::from_value(json!({
            "posts": [{"number": 1, "full_name": "a", "wip": true}],
            "total_count": 1,
            "page": 1,
            "next_page": null
        }))
        .unwrap();

        let output = transform_post_list(list, TransformOptions::truncate(500));
        let value = serde_json::to_value(&output).unwrap();

        assert_eq!(value["posts"][0]["wip"], json!("WIP"));
        assert_eq!(value["total_count"], json!(1));
        assert_eq!(value["next_page"], Value::Null);
        assert!(value.as_object().unwrap().contains_key("next_page"));
    }

    #[test]
    fn test_post_input_omits_unset_keys() {
        let input = PostInput {
            name: Some("title".to_string()),
            wip: Some(true),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({"name": "title", "wip": true})
        );
    }
}
