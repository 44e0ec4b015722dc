use esamcp_core::attachment::{
    attachment_content, normalize_attachment_path, resolve_signed_urls, SignedUrl,
    SignedUrlsResponse, MAX_INLINE_SIZE,
};
use esamcp_core::error::OperationError;
use esamcp_core::normalize::TeamName;
use esamcp_core::response::{Content, ToolResult};
use serde::Deserialize;

use super::{decode, run_tool_content, team_path, EsaApi, Query};

/// One attachment URL or several.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum AttachmentUrls {
    One(String),
    Many(Vec<String>),
}

impl Default for AttachmentUrls {
    fn default() -> Self {
        AttachmentUrls::Many(Vec::new())
    }
}

impl AttachmentUrls {
    pub fn paths(&self) -> Vec<String> {
        match self {
            AttachmentUrls::One(url) => vec![normalize_attachment_path(url)],
            AttachmentUrls::Many(urls) => urls
                .iter()
                .map(|url| normalize_attachment_path(url))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAttachmentArgs {
    #[serde(default)]
    pub team_name: TeamName,
    pub url: AttachmentUrls,
    #[serde(default)]
    pub force_signed_url: bool,
}

impl GetAttachmentArgs {
    pub fn validate(&self) -> Result<(), String> {
        match &self.url {
            AttachmentUrls::Many(urls) if urls.is_empty() => {
                Err("url must name at least one attachment".to_string())
            }
            _ => Ok(()),
        }
    }
}

async fn attachment_item<A: EsaApi>(api: &A, signed: SignedUrl, force_signed_url: bool) -> Content {
    let (path, url) = match signed {
        SignedUrl::Found { path, url } => (path, url),
        SignedUrl::NotFound { path } | SignedUrl::Missing { path } => {
            return Content::text(format!("Error: File not found: {path}"));
        }
    };

    if force_signed_url {
        return Content::text(url);
    }

    match api.fetch(&url).await {
        Ok(file) if file.content_length.is_some_and(|len| len > MAX_INLINE_SIZE as u64) => {
            Content::text(url)
        }
        Ok(file) => attachment_content(&url, &file.content_type, &file.bytes),
        Err(error) => {
            log::warn!("Attachment download failed for {path}: {error}");
            Content::text(format!(
                "Error: Failed to fetch attachment for {path}: {error}"
            ))
        }
    }
}

async fn get_attachment_data<A: EsaApi>(
    api: &A,
    args: &GetAttachmentArgs,
) -> Result<ToolResult, OperationError> {
    let team = args.team_name.require()?;
    let paths = args.url.paths();

    let query = Query::new().push("urls", paths.join(",")).push("v", 2);
    let response: SignedUrlsResponse =
        decode(api.get(team_path(team, "/signed_urls"), query).await?)?;

    let mut content = Vec::with_capacity(paths.len());
    // One at a time, in order: callers match items to paths by position.
    for signed in resolve_signed_urls(&paths, response)? {
        content.push(attachment_item(api, signed, args.force_signed_url).await);
    }

    Ok(ToolResult { content })
}

/// Download attachments through signed URLs, one content item per path.
pub async fn get_attachment<A: EsaApi>(api: &A, args: GetAttachmentArgs) -> ToolResult {
    run_tool_content(get_attachment_data(api, &args)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::esa::mock::{assert_request, MockApi};
    use crate::esa::{FetchedFile, Method};
    use serde_json::json;

    const SIGNED_PNG: &str = "https://signed.example.com/a.png?sig=1";
    const SIGNED_TXT: &str = "https://signed.example.com/b.txt?sig=2";

    fn args(url: AttachmentUrls) -> GetAttachmentArgs {
        GetAttachmentArgs {
            team_name: TeamName::new("docs"),
            url,
            force_signed_url: false,
        }
    }

    #[test]
    fn test_attachment_urls_accept_string_or_list() {
        let one: GetAttachmentArgs = serde_json::from_value(json!({
            "teamName": "docs",
            "url": "https://files.esa.io/uploads/a.png"
        }))
        .unwrap();
        let many: GetAttachmentArgs = serde_json::from_value(json!({
            "teamName": "docs",
            "url": ["/uploads/a.png", "https://dl.esa.io/uploads/b.txt"],
            "forceSignedUrl": true
        }))
        .unwrap();

        assert_eq!(one.url.paths(), vec!["/uploads/a.png"]);
        assert_eq!(many.url.paths(), vec!["/uploads/a.png", "/uploads/b.txt"]);
        assert!(many.force_signed_url);
        assert!(args(AttachmentUrls::Many(Vec::new())).validate().is_err());
    }

    #[tokio::test]
    async fn test_single_image_is_inlined() {
        let api = MockApi::new()
            .respond(
                200,
                json!({"signed_urls": [["/uploads/a.png", SIGNED_PNG]]}),
            )
            .file(SIGNED_PNG, "image/png", b"png");

        let result = get_attachment(
            &api,
            args(AttachmentUrls::One("https://files.esa.io/uploads/a.png".to_string())),
        )
        .await;

        let request = api.request(0);
        assert_request(&request, Method::Get, "/v1/teams/docs/signed_urls");
        assert_eq!(request.query.get("urls"), Some("/uploads/a.png"));
        assert_eq!(request.query.get("v"), Some("2"));

        assert_eq!(
            result.content,
            vec![Content::Image {
                data: "cG5n".to_string(),
                mime_type: "image/png".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_partial_failures_keep_input_order() {
        let api = MockApi::new()
            .respond(
                200,
                json!({"signed_urls": [
                    ["/uploads/a.png", SIGNED_PNG],
                    ["/uploads/missing.png", null],
                    ["/uploads/b.txt", SIGNED_TXT]
                ]}),
            )
            .file_result(SIGNED_PNG, Err(OperationError::message("Failed to fetch attachment: 403 Forbidden")))
            .file(SIGNED_TXT, "text/plain; charset=utf-8", b"hello");

        let result = get_attachment(
            &api,
            args(AttachmentUrls::Many(vec![
                "/uploads/a.png".to_string(),
                "/uploads/missing.png".to_string(),
                "/uploads/b.txt".to_string(),
            ])),
        )
        .await;

        assert_eq!(
            api.request(0).query.get("urls"),
            Some("/uploads/a.png,/uploads/missing.png,/uploads/b.txt")
        );
        assert_eq!(api.fetched(), vec![SIGNED_PNG, SIGNED_TXT]);
        assert_eq!(
            result.content,
            vec![
                Content::text(
                    "Error: Failed to fetch attachment for /uploads/a.png: Failed to fetch attachment: 403 Forbidden"
                ),
                Content::text("Error: File not found: /uploads/missing.png"),
                Content::text("hello"),
            ]
        );
    }

    #[tokio::test]
    async fn test_force_signed_url_skips_download() {
        let api = MockApi::new().respond(
            200,
            json!({"signed_urls": [["/uploads/a.png", SIGNED_PNG]]}),
        );

        let result = get_attachment(
            &api,
            GetAttachmentArgs {
                force_signed_url: true,
                ..args(AttachmentUrls::One("/uploads/a.png".to_string()))
            },
        )
        .await;

        assert!(api.fetched().is_empty());
        assert_eq!(result.first_text(), Some(SIGNED_PNG));
    }

    #[tokio::test]
    async fn test_oversized_file_returns_signed_url() {
        let api = MockApi::new()
            .respond(
                200,
                json!({"signed_urls": [["/uploads/big.pdf", SIGNED_PNG]]}),
            )
            .file_result(
                SIGNED_PNG,
                Ok(FetchedFile {
                    content_type: "application/pdf".to_string(),
                    content_length: Some(MAX_INLINE_SIZE as u64 + 1),
                    bytes: Vec::new(),
                }),
            );

        let result =
            get_attachment(&api, args(AttachmentUrls::One("/uploads/big.pdf".to_string()))).await;

        assert_eq!(result.first_text(), Some(SIGNED_PNG));
    }

    #[tokio::test]
    async fn test_binary_file_is_annotated_base64() {
        let api = MockApi::new()
            .respond(
                200,
                json!({"signed_urls": [["/uploads/doc.pdf", SIGNED_PNG]]}),
            )
            .file(SIGNED_PNG, "application/pdf", b"pdf");

        let result =
            get_attachment(&api, args(AttachmentUrls::One("/uploads/doc.pdf".to_string()))).await;

        assert_eq!(result.first_text(), Some("[application/pdf] base64:cGRm"));
    }

    #[tokio::test]
    async fn test_empty_signed_urls_is_an_error() {
        let api = MockApi::new().respond(200, json!({"signed_urls": []}));

        let result =
            get_attachment(&api, args(AttachmentUrls::One("/uploads/a.png".to_string()))).await;

        assert_eq!(
            result.first_text(),
            Some("Error: No signed URLs returned from API")
        );
    }

    #[tokio::test]
    async fn test_attachment_requires_team() {
        let api = MockApi::new();

        let result = get_attachment(
            &api,
            GetAttachmentArgs {
                url: AttachmentUrls::One("/uploads/a.png".to_string()),
                ..Default::default()
            },
        )
        .await;

        assert!(api.requests().is_empty());
        assert_eq!(
            result.first_text(),
            Some(OperationError::MissingTeamName.to_text().as_str())
        );
    }
}
