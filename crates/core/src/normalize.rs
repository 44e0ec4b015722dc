//! Normalization of user-supplied identifiers and queries
//!
//! Agents refer to teams, posts and searches in whatever shape they saw last:
//! host-qualified team names (`docs.esa.io`), post names carrying their
//! category (`dev/docs/api.md`) or date filters borrowed from other services
//! (`after:2024-01-01`). These functions turn them into the parameters the
//! esa API expects. All of them are total and deterministic.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::OperationError;

/// Strip everything from the first `.` onwards (`docs.esa.io` -> `docs`).
pub fn normalize_team_name(team_name: &str) -> String {
    team_name
        .split_once('.')
        .map_or(team_name, |(head, _)| head)
        .to_string()
}

/// A team identifier, normalized on construction.
///
/// Deserializing a missing or `null` value yields an empty name so that the
/// operation can answer with the missing-team guidance instead of a schema
/// error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TeamName(String);

impl TeamName {
    pub fn new(raw: &str) -> Self {
        Self(normalize_team_name(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The team name, or the missing-team error when it is empty.
    pub fn require(&self) -> Result<&str, OperationError> {
        if self.0.is_empty() {
            Err(OperationError::MissingTeamName)
        } else {
            Ok(&self.0)
        }
    }
}

impl From<&str> for TeamName {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TeamName {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Self::new(raw.as_deref().unwrap_or_default()))
    }
}

/// Name and category of a post after splitting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostNameParts {
    pub name: Option<String>,
    pub category: Option<String>,
}

/// Split a `category/name` path into its parts.
///
/// An explicit category (even `""`) always wins and leaves the name alone.
/// Otherwise the name is split on its last `/`; an empty trailing segment
/// becomes `None`.
pub fn normalize_post_name(name: Option<String>, category: Option<String>) -> PostNameParts {
    let name = match name {
        Some(name) if !name.is_empty() => name,
        name => return PostNameParts { name, category },
    };

    if category.is_some() {
        return PostNameParts {
            name: Some(name),
            category,
        };
    }

    match name.rsplit_once('/') {
        Some((category, title)) => PostNameParts {
            name: Some(title.to_string()).filter(|t| !t.is_empty()),
            category: Some(category.to_string()),
        },
        None => PostNameParts {
            name: Some(name),
            category: None,
        },
    }
}

/// Rewrite a search query into esa's syntax.
///
/// A lone `*` means "everything" and becomes the empty query.
/// `after:`/`since:` and `before:`/`until:` followed by a `YYYY-MM-DD` date
/// turn into `created:>` and `created:<`, case-insensitively.
pub fn normalize_search_query(query: &str) -> String {
    static RE_AFTER: OnceLock<Regex> = OnceLock::new();
    static RE_BEFORE: OnceLock<Regex> = OnceLock::new();

    let query = if query == "*" { "" } else { query };

    let re_after = RE_AFTER.get_or_init(|| {
        Regex::new(r"(?i)\b(?:after|since):([0-9]{4}-[0-9]{2}-[0-9]{2})\b").unwrap()
    });
    let re_before = RE_BEFORE.get_or_init(|| {
        Regex::new(r"(?i)\b(?:before|until):([0-9]{4}-[0-9]{2}-[0-9]{2})\b").unwrap()
    });

    let query = re_after.replace_all(query, "created:>$1");
    re_before.replace_all(&query, "created:<$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(name: Option<&str>, category: Option<&str>) -> PostNameParts {
        PostNameParts {
            name: name.map(str::to_string),
            category: category.map(str::to_string),
        }
    }

    fn split(name: Option<&str>, category: Option<&str>) -> PostNameParts {
        normalize_post_name(name.map(str::to_string), category.map(str::to_string))
    }

    #[test]
    fn test_team_name_truncates_at_first_dot() {
        assert_eq!(normalize_team_name("docs.esa.io"), "docs");
        assert_eq!(normalize_team_name("my-team.example.com"), "my-team");
        assert_eq!(normalize_team_name("docs"), "docs");
        assert_eq!(normalize_team_name(""), "");
        assert_eq!(normalize_team_name(".esa.io"), "");
    }

    #[test]
    fn test_team_name_is_idempotent_and_dot_free() {
        for raw in ["a.b.c", "plain", "", "..", "team."] {
            let once = normalize_team_name(raw);
            assert!(!once.contains('.'));
            assert_eq!(normalize_team_name(&once), once);
        }
    }

    #[test]
    fn test_team_name_deserializes_normalized() {
        let team: TeamName = serde_json::from_str("\"docs.esa.io\"").unwrap();
        assert_eq!(team.as_str(), "docs");

        let team: TeamName = serde_json::from_str("null").unwrap();
        assert!(team.is_empty());
        assert_eq!(team.require(), Err(OperationError::MissingTeamName));
    }

    #[test]
    fn test_post_name_splits_on_last_slash() {
        assert_eq!(split(Some("a/b/c"), None), parts(Some("c"), Some("a/b")));
        assert_eq!(
            split(Some("docs/api/v2/authentication.md"), None),
            parts(Some("authentication.md"), Some("docs/api/v2"))
        );
    }

    #[test]
    fn test_post_name_trailing_and_leading_slash() {
        assert_eq!(split(Some("folder/"), None), parts(None, Some("folder")));
        assert_eq!(split(Some("/guide"), None), parts(Some("guide"), Some("")));
    }

    #[test]
    fn test_post_name_explicit_category_wins() {
        assert_eq!(
            split(Some("a/b"), Some("dev")),
            parts(Some("a/b"), Some("dev"))
        );
        assert_eq!(split(Some("a/b"), Some("")), parts(Some("a/b"), Some("")));
    }

    #[test]
    fn test_post_name_without_slash_or_name() {
        assert_eq!(split(Some("title"), None), parts(Some("title"), None));
        assert_eq!(split(None, Some("dev")), parts(None, Some("dev")));
        assert_eq!(split(Some(""), None), parts(Some(""), None));
    }

    #[test]
    fn test_search_query_wildcard_collapses() {
        assert_eq!(normalize_search_query("*"), "");
        assert_eq!(normalize_search_query("* foo"), "* foo");
    }

    #[test]
    fn test_search_query_rewrites_date_aliases() {
        assert_eq!(
            normalize_search_query("after:2024-01-01 before:2024-02-01"),
            "created:>2024-01-01 created:<2024-02-01"
        );
        assert_eq!(
            normalize_search_query("SINCE:2024-01-01 Until:2024-12-31 release"),
            "created:>2024-01-01 created:<2024-12-31 release"
        );
    }

    #[test]
    fn test_search_query_leaves_other_syntax_alone() {
        assert_eq!(normalize_search_query("after:yesterday"), "after:yesterday");
        assert_eq!(
            normalize_search_query("created:>2024-01-01 tag:api"),
            "created:>2024-01-01 tag:api"
        );
        assert_eq!(normalize_search_query("hereafter:2024-01-01"), "hereafter:2024-01-01");
    }
}
