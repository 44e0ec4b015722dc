//! Team list transformation and the per-team recent posts resource

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// URI template of the recent posts resource.
pub const RECENT_POSTS_TEMPLATE: &str = "esa://teams/{teamName}/posts/recent";

const RECENT_POSTS_PREFIX: &str = "esa://teams/";
const RECENT_POSTS_SUFFIX: &str = "/posts/recent";

/// Team entry from `GET /v1/teams`
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Team {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub privacy: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamList {
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TeamOutput {
    pub url: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamListOutput {
    pub teams: Vec<TeamOutput>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Reduce each team to `url`, `name` and `description`.
pub fn transform_team_list(list: TeamList) -> TeamListOutput {
    TeamListOutput {
        teams: list
            .teams
            .into_iter()
            .map(|team| TeamOutput {
                url: team.url,
                name: team.name,
                description: team.description,
            })
            .collect(),
        rest: list.rest,
    }
}

/// Entry of `resources/list`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResourceDescriptor {
    pub uri: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

pub fn recent_posts_uri(team_name: &str) -> String {
    format!("{RECENT_POSTS_PREFIX}{team_name}{RECENT_POSTS_SUFFIX}")
}

/// Extract the team name from a recent posts URI.
pub fn parse_recent_posts_uri(uri: &str) -> Option<&str> {
    uri.strip_prefix(RECENT_POSTS_PREFIX)?
        .strip_suffix(RECENT_POSTS_SUFFIX)
        .filter(|team| !team.is_empty() && !team.contains('/'))
}

/// One recent posts resource per accessible team.
pub fn recent_posts_resources(teams: &[TeamOutput]) -> Vec<ResourceDescriptor> {
    teams
        .iter()
        .map(|team| {
            let suffix = team
                .description
                .as_deref()
                .filter(|d| !d.is_empty())
                .map(|d| format!(" ({d})"))
                .unwrap_or_default();

            ResourceDescriptor {
                uri: recent_posts_uri(&team.name),
                name: format!("Recent posts from {}", team.name),
                description: format!("Recent posts from {}{suffix}", team.name),
                mime_type: crate::response::JSON_MIME_TYPE.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn team_output(name: &str, description: Option<&str>) -> TeamOutput {
        TeamOutput {
            url: format!("https://{name}.esa.io/"),
            name: name.to_string(),
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn test_transform_team_list_reduces_fields() {
        let list: TeamList = serde_json::from_value(json!({
            "teams": [{
                "name": "docs",
                "privacy": "open",
                "description": "esa docs",
                "icon": "https://img.esa.io/icon.png",
                "url": "https://docs.esa.io/"
            }],
            "total_count": 1,
            "page": 1
        }))
        .unwrap();

        let value = serde_json::to_value(transform_team_list(list)).unwrap();

        assert_eq!(
            value["teams"],
            json!([{"url": "https://docs.esa.io/", "name": "docs", "description": "esa docs"}])
        );
        assert_eq!(value["total_count"], json!(1));
    }

    #[test]
    fn test_transform_team_list_omits_missing_description() {
        let list: TeamList = serde_json::from_value(json!({
            "teams": [{"name": "private", "url": "https://private.esa.io/"}]
        }))
        .unwrap();

        let value = serde_json::to_value(transform_team_list(list)).unwrap();

        assert_eq!(
            value["teams"][0],
            json!({"url": "https://private.esa.io/", "name": "private"})
        );
    }

    #[test]
    fn test_recent_posts_uri_round_trip() {
        let uri = recent_posts_uri("docs");
        assert_eq!(uri, "esa://teams/docs/posts/recent");
        assert_eq!(parse_recent_posts_uri(&uri), Some("docs"));
    }

    #[test]
    fn test_parse_recent_posts_uri_rejects_others() {
        assert_eq!(parse_recent_posts_uri("esa://teams//posts/recent"), None);
        assert_eq!(parse_recent_posts_uri("esa://teams/docs/posts"), None);
        assert_eq!(parse_recent_posts_uri("https://docs.esa.io/posts/recent"), None);
    }

    #[test]
    fn test_recent_posts_resources_descriptions() {
        let resources = recent_posts_resources(&[
            team_output("docs", Some("esa docs")),
            team_output("private", None),
        ]);

        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].name, "Recent posts from docs");
        assert_eq!(resources[0].description, "Recent posts from docs (esa docs)");
        assert_eq!(resources[1].description, "Recent posts from private");
        assert_eq!(resources[1].mime_type, "application/json");
    }
}
