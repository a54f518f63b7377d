use std::path::PathBuf;
use std::sync::Arc;

pub const PDF_MIME: &str = "application/pdf";

/// Where the bytes of a pending upload live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// Read from disk when the conversion is submitted.
    Path(PathBuf),
    /// Payload already in memory (e.g. delivered by a drop event).
    Memory(Arc<[u8]>),
}

/// A user-chosen file pending upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub name: String,
    pub mime: Option<String>,
    pub source: FileSource,
}

impl LocalFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            name,
            mime: None,
            source: FileSource::Path(path),
        }
    }

    pub fn from_bytes(name: impl Into<String>, mime: Option<String>, bytes: Arc<[u8]>) -> Self {
        Self {
            name: name.into(),
            mime,
            source: FileSource::Memory(bytes),
        }
    }

    /// PDF by declared MIME type or by a `.pdf` suffix, both case-insensitive.
    pub fn is_pdf(&self) -> bool {
        let mime_is_pdf = self
            .mime
            .as_deref()
            .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(PDF_MIME));
        mime_is_pdf || self.name.to_ascii_lowercase().ends_with(".pdf")
    }
}

/// Server-returned reference to a converted artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    pub name: String,
    pub url: String,
}

impl ConvertedFile {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Why a conversion request ended without a server reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitFailure {
    /// A picked file could not be read before upload.
    LocalFile(String),
    /// The request failed in transit or the server answered with an error status.
    Transport(String),
}

/// Decoded body of a 2xx conversion response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversionReport {
    pub success: bool,
    pub files: Vec<ConvertedFile>,
    pub message: Option<String>,
}
