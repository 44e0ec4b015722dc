use crate::esa::{summarize, EsaApi};
use esamcp_core::prompt::{translate, Locale, PromptText};
use serde::{Deserialize, Serialize};

use super::{parse_params, to_result, JsonRpcError};

const SUMMARIZE_POST: &str = "esa_summarize_post";

#[derive(Debug, Serialize)]
pub struct PromptArgument {
    pub name: String,
    pub description: String,
    pub required: bool,
}

#[derive(Debug, Serialize)]
pub struct Prompt {
    pub name: String,
    pub title: String,
    pub description: String,
    pub arguments: Vec<PromptArgument>,
}

#[derive(Debug, Serialize)]
pub struct PromptsList {
    pub prompts: Vec<Prompt>,
}

#[derive(Debug, Deserialize)]
pub struct GetPromptParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

fn argument(locale: Locale, name: &str, key: PromptText, required: bool) -> PromptArgument {
    PromptArgument {
        name: name.to_string(),
        description: translate(locale, key).to_string(),
        required,
    }
}

/// Prompt titles and descriptions follow the server locale.
pub fn handle_prompts_list(locale: Locale) -> Result<serde_json::Value, JsonRpcError> {
    let summarize = Prompt {
        name: SUMMARIZE_POST.to_string(),
        title: translate(locale, PromptText::Title).to_string(),
        description: translate(locale, PromptText::Description).to_string(),
        arguments: vec![
            argument(locale, "teamName", PromptText::TeamNameArg, true),
            argument(locale, "postNumber", PromptText::PostNumberArg, true),
            argument(locale, "format", PromptText::FormatArg, false),
        ],
    };

    to_result(&PromptsList {
        prompts: vec![summarize],
    })
}

pub async fn handle_prompts_get<A: EsaApi>(
    params: Option<serde_json::Value>,
    api: &A,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: GetPromptParams = parse_params(params, "params")?;

    match params.name.as_str() {
        SUMMARIZE_POST => {
            let args: summarize::SummarizePostArgs = parse_params(params.arguments, "arguments")?;
            to_result(&summarize::summarize_post(api, args).await)
        }
        name => Err(JsonRpcError::invalid_params(format!("Unknown prompt: {name}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::esa::mock::MockApi;
    use serde_json::json;

    #[test]
    fn test_prompts_list_english() {
        let result = handle_prompts_list(Locale::En).unwrap();

        let prompt = &result["prompts"][0];
        assert_eq!(prompt["name"], json!("esa_summarize_post"));
        assert_eq!(prompt["title"], json!("Summarize esa post"));
        assert_eq!(
            prompt["arguments"],
            json!([
                {"name": "teamName", "description": "esa team name", "required": true},
                {"name": "postNumber", "description": "Post number to summarize", "required": true},
                {
                    "name": "format",
                    "description": "Summary format: bullet (default), paragraph, or keywords",
                    "required": false
                }
            ])
        );
    }

    #[test]
    fn test_prompts_list_japanese() {
        let result = handle_prompts_list(Locale::Ja).unwrap();

        assert_eq!(result["prompts"][0]["title"], json!("esa の記事を要約"));
        assert_eq!(
            result["prompts"][0]["arguments"][1]["description"],
            json!("要約する記事の番号")
        );
    }

    #[tokio::test]
    async fn test_prompts_get_unknown_prompt() {
        let api = MockApi::new();

        let error = handle_prompts_get(Some(json!({"name": "esa_translate_post"})), &api)
            .await
            .unwrap_err();

        assert_eq!(
            error,
            JsonRpcError::invalid_params("Unknown prompt: esa_translate_post")
        );
    }

    #[tokio::test]
    async fn test_prompts_get_without_arguments_is_an_envelope() {
        let api = MockApi::new();

        let result = handle_prompts_get(Some(json!({"name": "esa_summarize_post"})), &api)
            .await
            .unwrap();

        assert!(api.requests().is_empty());
        assert_eq!(result["messages"][0]["role"], json!("user"));
        assert!(result["messages"][0]["content"]["text"]
            .as_str()
            .unwrap()
            .starts_with("Error: Missing required parameter 'teamName'"));
    }
}
