use crate::view_model::{AppViewModel, PreviewView, ResultRowView};
use crate::{ConvertedFile, LocalFile};

pub type RequestId = u64;

/// Banner shown under the upload form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    Warning(String),
    Success(String),
    Error(String),
}

/// Per-selection preview machine: `Loading -> {Content | Failed}`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PreviewState {
    #[default]
    Empty,
    Loading { request_id: RequestId },
    Content { text: String },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pending: Vec<LocalFile>,
    conversion: Option<RequestId>,
    status: RequestStatus,
    results: Vec<ConvertedFile>,
    selection: Option<ConvertedFile>,
    preview: PreviewState,
    show_upload: bool,
    next_request_id: RequestId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            conversion: None,
            status: RequestStatus::Idle,
            results: Vec::new(),
            selection: None,
            preview: PreviewState::Empty,
            show_upload: true,
            next_request_id: 1,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let active_url = self.selection.as_ref().map(|file| file.url.as_str());
        let results = self
            .results
            .iter()
            .map(|file| ResultRowView {
                file: file.clone(),
                active: active_url == Some(file.url.as_str()),
            })
            .collect();

        AppViewModel {
            pending_files: self.pending.iter().map(|file| file.name.clone()).collect(),
            in_flight: self.in_flight(),
            can_submit: !self.in_flight() && !self.pending.is_empty(),
            status: self.status.clone(),
            results,
            show_upload: self.show_upload,
            preview: self.preview_view(),
            dirty: self.dirty,
        }
    }

    fn preview_view(&self) -> PreviewView {
        let Some(selection) = &self.selection else {
            return PreviewView::NoSelection;
        };
        let name = selection.name.clone();
        match &self.preview {
            PreviewState::Empty | PreviewState::Loading { .. } => PreviewView::Loading { name },
            PreviewState::Content { text } => PreviewView::Content {
                name,
                text: text.clone(),
            },
            PreviewState::Failed { message } => PreviewView::Failed {
                name,
                message: message.clone(),
            },
        }
    }

    pub fn pending_files(&self) -> &[LocalFile] {
        &self.pending
    }

    pub fn results(&self) -> &[ConvertedFile] {
        &self.results
    }

    pub fn selection(&self) -> Option<&ConvertedFile> {
        self.selection.as_ref()
    }

    pub fn status(&self) -> &RequestStatus {
        &self.status
    }

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    pub fn show_upload(&self) -> bool {
        self.show_upload
    }

    pub fn in_flight(&self) -> bool {
        self.conversion.is_some()
    }

    /// True while any request is outstanding; the shell keeps repainting.
    pub fn is_busy(&self) -> bool {
        self.in_flight() || matches!(self.preview, PreviewState::Loading { .. })
    }

    /// Returns whether the state changed since the last call, then clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn allocate_request_id(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub(crate) fn replace_pending(&mut self, files: Vec<LocalFile>) {
        self.pending = files;
        self.status = RequestStatus::Idle;
        self.clear_results();
        self.mark_dirty();
    }

    pub(crate) fn set_status(&mut self, status: RequestStatus) {
        self.status = status;
        self.mark_dirty();
    }

    /// Starts a conversion of the pending set and returns its id.
    pub(crate) fn begin_conversion(&mut self) -> RequestId {
        let id = self.allocate_request_id();
        self.conversion = Some(id);
        self.status = RequestStatus::Idle;
        self.clear_results();
        self.mark_dirty();
        id
    }

    /// Clears the outstanding conversion if `request_id` is the one awaited.
    pub(crate) fn finish_conversion(&mut self, request_id: RequestId) -> bool {
        if self.conversion != Some(request_id) {
            return false;
        }
        self.conversion = None;
        self.mark_dirty();
        true
    }

    pub(crate) fn accept_results(&mut self, files: Vec<ConvertedFile>) {
        self.pending.clear();
        self.results = files;
        self.show_upload = false;
        self.mark_dirty();
    }

    /// Makes `file` the active selection and returns the id of its fetch.
    pub(crate) fn select(&mut self, file: ConvertedFile) -> RequestId {
        let id = self.allocate_request_id();
        self.selection = Some(file);
        self.preview = PreviewState::Loading { request_id: id };
        self.mark_dirty();
        id
    }

    /// Applies a fetch outcome if it belongs to the current selection.
    pub(crate) fn finish_preview(&mut self, request_id: RequestId, next: PreviewState) -> bool {
        match self.preview {
            PreviewState::Loading { request_id: awaited } if awaited == request_id => {
                self.preview = next;
                self.mark_dirty();
                true
            }
            _ => false,
        }
    }

    pub(crate) fn edit_content(&mut self, text: String) -> bool {
        match &mut self.preview {
            PreviewState::Content { text: current } => {
                if *current != text {
                    *current = text;
                    self.mark_dirty();
                }
                true
            }
            _ => false,
        }
    }

    /// Returns to a clean upload view; reports whether any request was abandoned.
    pub(crate) fn reset(&mut self) -> bool {
        let had_outstanding = self.is_busy();
        let was_clean = self.pending.is_empty()
            && self.results.is_empty()
            && self.selection.is_none()
            && self.status == RequestStatus::Idle
            && self.show_upload
            && !had_outstanding
            && self.preview == PreviewState::Empty;

        self.pending.clear();
        self.conversion = None;
        self.status = RequestStatus::Idle;
        self.clear_results();
        self.show_upload = true;
        if !was_clean {
            self.mark_dirty();
        }
        had_outstanding
    }

    fn clear_results(&mut self) {
        self.results.clear();
        self.selection = None;
        self.preview = PreviewState::Empty;
    }
}
