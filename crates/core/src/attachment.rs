//! Attachment path normalization and content classification

use base64::Engine;
use serde::Deserialize;

use crate::error::OperationError;
use crate::response::Content;

/// Hosts serving esa attachments; their URLs are reduced to a path.
pub const ATTACHMENT_HOSTS: [&str; 2] = ["files.esa.io", "dl.esa.io"];

/// Largest attachment inlined as base64 (30 MiB).
pub const MAX_INLINE_SIZE: usize = 30 * 1024 * 1024;

/// Image types returned as image content.
pub const SUPPORTED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

const TEXT_APPLICATION_TYPES: [&str; 6] = [
    "application/json",
    "application/xml",
    "application/yaml",
    "application/x-yaml",
    "application/javascript",
    "application/x-ndjson",
];

/// Turn an attachment URL into the path the signed URL API expects.
///
/// `https://files.esa.io/uploads/a.png` becomes `/uploads/a.png`; paths and
/// URLs on other hosts are returned unchanged.
pub fn normalize_attachment_path(url: &str) -> String {
    let url = url.trim();
    let Some(rest) = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
    else {
        return url.to_string();
    };

    let (host, path) = match rest.find('/') {
        Some(index) => rest.split_at(index),
        None => (rest, "/"),
    };
    let host = host.rsplit_once('@').map_or(host, |(_, host)| host);
    let host = host.split_once(':').map_or(host, |(host, _)| host);

    if !ATTACHMENT_HOSTS.contains(&host.to_ascii_lowercase().as_str()) {
        return url.to_string();
    }

    let end = path.find(|c: char| c == '?' || c == '#').unwrap_or(path.len());
    path[..end].to_string()
}

/// Response of `GET /signed_urls`: `[original, signed]` pairs, `signed` is
/// `null` when the file does not exist.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct SignedUrlsResponse {
    #[serde(default)]
    pub signed_urls: Vec<(String, Option<String>)>,
}

/// Outcome of the signed URL lookup for one requested path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignedUrl {
    Found { path: String, url: String },
    NotFound { path: String },
    Missing { path: String },
}

impl SignedUrl {
    pub fn path(&self) -> &str {
        match self {
            SignedUrl::Found { path, .. }
            | SignedUrl::NotFound { path }
            | SignedUrl::Missing { path } => path,
        }
    }
}

/// Match the API's pairs back to the requested paths, in request order.
///
/// Pairs are looked up by their original path first and by position when the
/// API rewrote it.
pub fn resolve_signed_urls(
    paths: &[String],
    response: SignedUrlsResponse,
) -> Result<Vec<SignedUrl>, OperationError> {
    if response.signed_urls.is_empty() {
        return Err(OperationError::message("No signed URLs returned from API"));
    }

    let pairs = response.signed_urls;
    let resolved = paths
        .iter()
        .enumerate()
        .map(|(index, path)| {
            let pair = pairs
                .iter()
                .find(|(original, _)| original == path)
                .or_else(|| pairs.get(index));

            match pair {
                Some((_, Some(url))) => SignedUrl::Found {
                    path: path.clone(),
                    url: url.clone(),
                },
                Some((_, None)) => SignedUrl::NotFound { path: path.clone() },
                None => SignedUrl::Missing { path: path.clone() },
            }
        })
        .collect();

    Ok(resolved)
}

/// How a downloaded attachment is handed to the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Text,
    Binary,
    Oversized,
}

/// Media type without parameters, lowercased (`Text/Plain; charset=x` -> `text/plain`).
pub fn mime_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

pub fn is_supported_image(mime: &str) -> bool {
    SUPPORTED_IMAGE_TYPES.contains(&mime)
}

pub fn is_text_type(mime: &str) -> bool {
    mime.starts_with("text/")
        || TEXT_APPLICATION_TYPES.contains(&mime)
        || mime.ends_with("+json")
        || mime.ends_with("+xml")
}

pub fn classify_attachment(content_type: &str, size: usize) -> AttachmentKind {
    let mime = mime_essence(content_type);

    if size > MAX_INLINE_SIZE {
        AttachmentKind::Oversized
    } else if is_supported_image(&mime) && size > 0 {
        AttachmentKind::Image
    } else if is_text_type(&mime) {
        AttachmentKind::Text
    } else {
        AttachmentKind::Binary
    }
}

/// Build the content item for a downloaded attachment.
///
/// Oversized files are not inlined: the signed URL is returned instead.
pub fn attachment_content(signed_url: &str, content_type: &str, bytes: &[u8]) -> Content {
    let engine = base64::engine::general_purpose::STANDARD;
    let mime = mime_essence(content_type);

    match classify_attachment(content_type, bytes.len()) {
        AttachmentKind::Image => Content::Image {
            data: engine.encode(bytes),
            mime_type: mime,
        },
        AttachmentKind::Text => Content::text(String::from_utf8_lossy(bytes)),
        AttachmentKind::Binary => {
            let mime = if mime.is_empty() {
                "application/octet-stream".to_string()
            } else {
                mime
            };
            Content::text(format!("[{mime}] base64:{}", engine.encode(bytes)))
        }
        AttachmentKind::Oversized => Content::text(signed_url),
    }
}
