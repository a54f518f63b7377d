use crate::{LocalFile, RequestId};

/// Side effects requested by [`crate::update`]; executed by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Upload the given files as one multipart conversion request.
    SubmitConversion {
        request_id: RequestId,
        files: Vec<LocalFile>,
    },
    /// Retrieve the raw markdown behind a descriptor url.
    FetchMarkdown { request_id: RequestId, url: String },
    /// Open a descriptor url outside the app (download).
    OpenExternal { url: String },
    /// Abandon every outstanding request.
    CancelPending,
}
