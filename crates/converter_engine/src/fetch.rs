use client_logging::{client_debug, client_warn};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;

use crate::client::{buffer_response, is_json_content_type, map_reqwest_error};
use crate::decode::decode_text;
use crate::settings::MARKDOWN_ACCEPT;
use crate::{ClientSettings, FailureKind, RequestError};

pub const INVALID_FORMAT_MESSAGE: &str = "Invalid response format";

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// Retrieves the raw markdown behind a descriptor url.
    async fn fetch_markdown(&self, url: &str) -> Result<String, RequestError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: ClientSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch_markdown(&self, url: &str) -> Result<String, RequestError> {
        let resolved = self.settings.resolve(url)?;
        let client = self.settings.build_client()?;

        client_debug!("GET {}", resolved);
        let response = client
            .get(resolved)
            .header(ACCEPT, MARKDOWN_ACCEPT)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = buffer_response(response, self.settings.max_bytes).await?;

        let result = interpret_markdown_response(
            response.status,
            response.content_type.as_deref(),
            &response.body,
        );
        if let Err(err) = &result {
            client_warn!("markdown fetch for {} failed ({}): {}", url, err.kind, err.message);
        }
        result
    }
}

/// Classifies a markdown response.
///
/// Only a plain text body counts as content. A JSON body (by Content-Type, or
/// because it parses as an object or array) is a format error, unless the
/// request failed and the payload carries a string `error` field, which then
/// becomes the message.
pub fn interpret_markdown_response(
    status: StatusCode,
    content_type: Option<&str>,
    body: &[u8],
) -> Result<String, RequestError> {
    let structured = structured_body(content_type, body);

    if !status.is_success() {
        return Err(match structured {
            Some(value) => match value.get("error").and_then(|error| error.as_str()) {
                Some(message) => RequestError::new(FailureKind::Server, message),
                None => invalid_format(),
            },
            None if is_json(content_type) => invalid_format(),
            None => RequestError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("request failed with status {status}"),
            ),
        });
    }

    if structured.is_some() || is_json(content_type) {
        return Err(invalid_format());
    }

    decode_text(body, content_type)
        .map(|decoded| decoded.text)
        .map_err(|err| {
            client_debug!("markdown body rejected: {}", err);
            invalid_format()
        })
}

fn is_json(content_type: Option<&str>) -> bool {
    content_type.is_some_and(is_json_content_type)
}

fn structured_body(content_type: Option<&str>, body: &[u8]) -> Option<serde_json::Value> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    if value.is_object() || value.is_array() || is_json(content_type) {
        Some(value)
    } else {
        None
    }
}

fn invalid_format() -> RequestError {
    RequestError::new(FailureKind::InvalidFormat, INVALID_FORMAT_MESSAGE)
}
