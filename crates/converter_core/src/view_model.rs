use crate::{ConvertedFile, RequestStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub pending_files: Vec<String>,
    pub in_flight: bool,
    pub can_submit: bool,
    pub status: RequestStatus,
    pub results: Vec<ResultRowView>,
    pub show_upload: bool,
    pub preview: PreviewView,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRowView {
    pub file: ConvertedFile,
    pub active: bool,
}

/// Three-state preview panel plus the placeholder shown without a selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PreviewView {
    #[default]
    NoSelection,
    Loading { name: String },
    Failed { name: String, message: String },
    Content { name: String, text: String },
}
