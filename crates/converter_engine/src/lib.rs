//! Converter engine: HTTP requests against the conversion server.
mod client;
mod decode;
mod engine;
mod fetch;
mod settings;
mod types;
mod upload;

pub use decode::{decode_text, DecodeError, DecodedText};
pub use engine::EngineHandle;
pub use fetch::{interpret_markdown_response, Fetcher, ReqwestFetcher, INVALID_FORMAT_MESSAGE};
pub use settings::{ClientSettings, CONVERT_PATH, DEFAULT_BASE_URL, FILES_FIELD, MARKDOWN_ACCEPT};
pub use types::{
    ConversionReply, EngineEvent, FailureKind, FileDescriptor, RequestError, RequestId,
    UploadFile, UploadSource,
};
pub use upload::{ReqwestUploader, Uploader};
