//! Prompt text for the post summary prompt
//!
//! The prompt's title, description and argument descriptions are localized;
//! the [`Locale`] is chosen once at startup and passed in explicitly.

use serde::Deserialize;

use crate::error::OperationError;
use crate::post::Post;

/// Environment variables consulted for the locale, in priority order.
pub const LOCALE_ENV_VARS: [&str; 4] = ["LC_ALL", "LC_MESSAGES", "LANG", "LANGUAGE"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    Ja,
}

impl Locale {
    /// Parse a language tag such as `ja_JP.UTF-8`; unknown languages fall back to English.
    pub fn parse(tag: &str) -> Self {
        let language = tag.split(['-', '_', '.']).next().unwrap_or_default();
        match language.to_ascii_lowercase().as_str() {
            "ja" => Locale::Ja,
            _ => Locale::En,
        }
    }

    /// Detect the locale from the first non-empty variable of [`LOCALE_ENV_VARS`].
    pub fn detect<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        LOCALE_ENV_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .map(|value| {
                value
                    .split(['-', '_', '.'])
                    .next()
                    .unwrap_or_default()
                    .to_string()
            })
            .find(|language| !language.is_empty())
            .map(|language| Locale::parse(&language))
            .unwrap_or_default()
    }
}

/// Translatable strings of the summary prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptText {
    Title,
    Description,
    TeamNameArg,
    PostNumberArg,
    FormatArg,
}

pub fn translate(locale: Locale, key: PromptText) -> &'static str {
    match (locale, key) {
        (Locale::En, PromptText::Title) => "Summarize esa post",
        (Locale::En, PromptText::Description) => {
            "Generate a summary of an esa post in the requested format"
        }
        (Locale::En, PromptText::TeamNameArg) => "esa team name",
        (Locale::En, PromptText::PostNumberArg) => "Post number to summarize",
        (Locale::En, PromptText::FormatArg) => {
            "Summary format: bullet (default), paragraph, or keywords"
        }
        (Locale::Ja, PromptText::Title) => "esa の記事を要約",
        (Locale::Ja, PromptText::Description) => "esa の記事を指定した形式で要約します",
        (Locale::Ja, PromptText::TeamNameArg) => "esa のチーム名",
        (Locale::Ja, PromptText::PostNumberArg) => "要約する記事の番号",
        (Locale::Ja, PromptText::FormatArg) => {
            "要約の形式: bullet (デフォルト)、paragraph、keywords"
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SummaryFormat {
    #[default]
    Bullet,
    Paragraph,
    Keywords,
}

impl SummaryFormat {
    fn instruction(self) -> &'static str {
        match self {
            SummaryFormat::Bullet => "Please provide a summary in bullet points (3-5 main points).",
            SummaryFormat::Paragraph => "Please provide a summary in 2-3 paragraphs.",
            SummaryFormat::Keywords => {
                "Please extract and list 10-15 important keywords from this post."
            }
        }
    }
}

/// Prompt arguments arrive as strings; the post number must be a positive integer.
pub fn parse_post_number(raw: &str) -> Result<u64, OperationError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|number| *number > 0)
        .ok_or_else(|| OperationError::message("Post number must be a positive integer"))
}

pub fn build_summary_prompt(post: &Post, format: SummaryFormat) -> String {
    let author = post
        .created_by
        .as_ref()
        .map(|user| user.name.as_str())
        .unwrap_or_default();

    let mut prompt = String::from("Please summarize the following post:\n\n");
    prompt.push_str(&format!("Title: {}\n", post.name));
    prompt.push_str(&format!("URL: {}\n", post.url));
    prompt.push_str(&format!("Author: {author}\n"));
    prompt.push_str(&format!("Created: {}\n", post.created_at));
    prompt.push_str(&format!("Updated: {}\n", post.updated_at));

    if let Some(category) = post.category.as_deref().filter(|c| !c.is_empty()) {
        prompt.push_str(&format!("Category: {category}\n"));
    }

    if !post.tags.is_empty() {
        prompt.push_str(&format!("Tags: {}\n", post.tags.join(", ")));
    }

    prompt.push_str("\n---\n\n");

    if let Some(body) = post.body_md.as_deref().filter(|b| !b.is_empty()) {
        prompt.push_str(&format!("Content:\n{body}\n\n---\n\n"));
    }

    prompt.push_str(format.instruction());
    prompt
}
