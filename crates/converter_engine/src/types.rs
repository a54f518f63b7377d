use std::fmt;
use std::path::PathBuf;

use bytes::Bytes;
use serde::Deserialize;

pub type RequestId = u64;

/// Server-returned reference to a converted artifact.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileDescriptor {
    pub name: String,
    pub url: String,
}

/// JSON body of `POST /convert`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConversionReply {
    pub success: bool,
    #[serde(default)]
    pub files: Option<Vec<FileDescriptor>>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSource {
    Path(PathBuf),
    Bytes(Bytes),
}

/// One part of the multipart conversion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub mime: Option<String>,
    pub source: UploadSource,
}

impl UploadFile {
    pub(crate) async fn read(&self) -> Result<Vec<u8>, RequestError> {
        match &self.source {
            UploadSource::Bytes(bytes) => Ok(bytes.to_vec()),
            UploadSource::Path(path) => tokio::fs::read(path).await.map_err(|err| {
                RequestError::new(
                    FailureKind::Io,
                    format!("could not read {}: {err}", path.display()),
                )
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ConversionCompleted {
        request_id: RequestId,
        result: Result<ConversionReply, RequestError>,
    },
    MarkdownCompleted {
        request_id: RequestId,
        result: Result<String, RequestError>,
    },
}

/// A failed request. `message` is the human-readable text shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RequestError {
    pub kind: FailureKind,
    pub message: String,
}

impl RequestError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    /// Body was not of the expected shape.
    InvalidFormat,
    /// Server answered with a structured `{ "error": ... }` payload.
    Server,
    Io,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::InvalidFormat => write!(f, "invalid response format"),
            FailureKind::Server => write!(f, "server error"),
            FailureKind::Io => write!(f, "io error"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
