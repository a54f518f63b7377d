use crate::{ConversionReport, ConvertedFile, LocalFile, RequestId, SubmitFailure};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Files dropped on the upload zone or picked in the file dialog.
    FilesAdded(Vec<LocalFile>),
    /// User clicked "Convert Files".
    SubmitClicked,
    /// Engine completion for a conversion request. A business failure arrives
    /// as `Ok` with `success == false`.
    ConversionFinished {
        request_id: RequestId,
        result: Result<ConversionReport, SubmitFailure>,
    },
    /// User clicked "Start New Conversion".
    ResetClicked,
    /// User picked a converted file from the results list.
    ResultSelected(ConvertedFile),
    /// Engine completion for a markdown fetch.
    MarkdownFinished {
        request_id: RequestId,
        result: Result<String, String>,
    },
    /// User edited the preview text.
    EditorChanged(String),
    /// User clicked "Download".
    DownloadClicked,
}
