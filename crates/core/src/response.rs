//! MCP response envelopes
//!
//! Tools, resources and prompts each answer with their own fixed shape.
//! Success formatters serialize data as 2-space indented JSON; error
//! formatters place `OperationError::to_text` in the same shape.

use serde::{Deserialize, Serialize};

use crate::error::OperationError;

/// MIME type of every resource this server returns.
pub const JSON_MIME_TYPE: &str = "application/json";

/// Single content item of a tool result or prompt message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },

    #[serde(rename = "image")]
    Image {
        data: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text { text: text.into() }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text { text } => Some(text),
            Content::Image { .. } => None,
        }
    }
}

/// `{ content: [...] }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResult {
    pub content: Vec<Content>,
}

impl ToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Content::text(text)],
        }
    }

    /// Text of the first item, if it is a text item.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().and_then(Content::as_text)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceContent {
    pub uri: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub text: String,
}

/// `{ contents: [{ uri, mimeType, text }] }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceResult {
    pub contents: Vec<ResourceContent>,
}

impl ResourceResult {
    fn json(uri: &str, text: String) -> Self {
        Self {
            contents: vec![ResourceContent {
                uri: uri.to_string(),
                mime_type: JSON_MIME_TYPE.to_string(),
                text,
            }],
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptMessage {
    pub role: Role,
    pub content: Content,
}

/// `{ messages: [{ role: "user", content: { type: "text", text } }] }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptResult {
    pub messages: Vec<PromptMessage>,
}

impl PromptResult {
    fn user(text: String) -> Self {
        Self {
            messages: vec![PromptMessage {
                role: Role::User,
                content: Content::Text { text },
            }],
        }
    }
}

fn to_json<T: Serialize + ?Sized>(data: &T) -> Result<String, OperationError> {
    Ok(serde_json::to_string_pretty(data)?)
}

pub fn format_tool_response<T: Serialize + ?Sized>(data: &T) -> ToolResult {
    match to_json(data) {
        Ok(text) => ToolResult::text(text),
        Err(error) => format_tool_error(&error),
    }
}

pub fn format_tool_error(error: &OperationError) -> ToolResult {
    ToolResult::text(error.to_text())
}

pub fn format_resource_response<T: Serialize + ?Sized>(data: &T, uri: &str) -> ResourceResult {
    match to_json(data) {
        Ok(text) => ResourceResult::json(uri, text),
        Err(error) => format_resource_error(&error, uri),
    }
}

pub fn format_resource_error(error: &OperationError, uri: &str) -> ResourceResult {
    ResourceResult::json(uri, error.to_text())
}

pub fn format_prompt_response(message: impl Into<String>) -> PromptResult {
    PromptResult::user(message.into())
}

pub fn format_prompt_error(error: &OperationError) -> PromptResult {
    PromptResult::user(error.to_text())
}
