//! Converter core: pure state machine and view-model helpers.
mod effect;
mod file;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use file::{
    ConversionReport, ConvertedFile, FileSource, LocalFile, SubmitFailure, PDF_MIME,
};
pub use msg::Msg;
pub use state::{AppState, PreviewState, RequestId, RequestStatus};
pub use update::{
    update, CONVERSION_FAILED_FALLBACK, CONVERSION_SUCCESS, NO_FILES_WARNING,
    PREVIEW_FAILED_FALLBACK,
};
pub use view_model::{AppViewModel, PreviewView, ResultRowView};
