//! Transformation functions for esa comment responses

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::post::{truncate_body, TransformOptions, User};

/// Comment response from the esa API
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Comment {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub body_md: Option<String>,
    #[serde(default)]
    pub body_html: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub post_number: u64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub created_by: Option<User>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub star: bool,
    #[serde(default)]
    pub stargazers: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentList {
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CommentStats {
    pub stargazers_count: u64,
    pub star: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CommentOutput {
    pub id: u64,
    pub post_number: u64,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_md: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub created_by: Option<User>,
    pub stats: CommentStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stargazers: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentListOutput {
    pub comments: Vec<CommentOutput>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Body of comment create/update requests.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CommentInput {
    pub body_md: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

pub fn transform_comment(comment: Comment, options: TransformOptions) -> CommentOutput {
    CommentOutput {
        id: comment.id,
        post_number: comment.post_number,
        url: comment.url,
        body_md: truncate_body(comment.body_md, options.truncate_body),
        created_at: comment.created_at,
        updated_at: comment.updated_at,
        created_by: comment.created_by,
        stats: CommentStats {
            stargazers_count: comment.stargazers_count,
            star: comment.star,
        },
        stargazers: comment.stargazers,
    }
}

pub fn transform_comment_list(list: CommentList, options: TransformOptions) -> CommentListOutput {
    CommentListOutput {
        comments: list
            .comments
            .into_iter()
            .map(|comment| transform_comment(comment, options))
            .collect(),
        rest: list.rest,
    }
}
