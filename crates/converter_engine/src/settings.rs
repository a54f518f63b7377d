use std::time::Duration;

use url::Url;

use crate::{FailureKind, RequestError};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const CONVERT_PATH: &str = "/convert";
pub const FILES_FIELD: &str = "files[]";
pub const MARKDOWN_ACCEPT: &str = "text/markdown, text/plain, */*";

/// Connection settings shared by every request the client makes.
///
/// `base_url` is the single backend address: the convert endpoint and every
/// descriptor url are resolved against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: None,
            request_timeout: None,
            max_bytes: 64 * 1024 * 1024,
        }
    }
}

impl ClientSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Joins a server path onto the base url, keeping any path prefix of the base.
    /// Absolute urls are accepted only when they are http(s) on the base origin.
    pub fn resolve(&self, path: &str) -> Result<Url, RequestError> {
        let invalid =
            |err: url::ParseError| RequestError::new(FailureKind::InvalidUrl, err.to_string());

        let mut base = Url::parse(self.base_url.trim()).map_err(invalid)?;
        if base.cannot_be_a_base() || !is_http(&base) {
            return Err(RequestError::new(
                FailureKind::InvalidUrl,
                format!("{} cannot be used as a base url", self.base_url),
            ));
        }

        if let Ok(absolute) = Url::parse(path) {
            if !is_http(&absolute) || absolute.origin() != base.origin() {
                let origin = base.origin().ascii_serialization();
                return Err(RequestError::new(
                    FailureKind::InvalidUrl,
                    format!("refusing url outside {origin}: {path}"),
                ));
            }
            return Ok(absolute);
        }

        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(path.trim_start_matches('/')).map_err(invalid)
    }

    pub(crate) fn build_client(&self) -> Result<reqwest::Client, RequestError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| RequestError::new(FailureKind::Network, err.to_string()))
    }
}

fn is_http(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}
