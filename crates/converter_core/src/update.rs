use crate::{
    AppState, ConversionReport, Effect, LocalFile, Msg, PreviewState, RequestStatus, SubmitFailure,
};

pub const NO_FILES_WARNING: &str = "Please select at least one PDF file.";
pub const CONVERSION_SUCCESS: &str = "Conversion successful! Files are ready below.";
pub const CONVERSION_FAILED_FALLBACK: &str = "Conversion failed.";
pub const PREVIEW_FAILED_FALLBACK: &str = "Failed to load markdown content";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesAdded(candidates) => {
            let pdfs: Vec<LocalFile> = candidates.into_iter().filter(LocalFile::is_pdf).collect();
            state.replace_pending(pdfs);
            Vec::new()
        }
        Msg::SubmitClicked => {
            if state.in_flight() {
                return (state, Vec::new());
            }
            if state.pending_files().is_empty() {
                state.set_status(RequestStatus::Warning(NO_FILES_WARNING.to_string()));
                return (state, Vec::new());
            }
            let files = state.pending_files().to_vec();
            let request_id = state.begin_conversion();
            vec![Effect::SubmitConversion { request_id, files }]
        }
        Msg::ConversionFinished { request_id, result } => {
            if !state.finish_conversion(request_id) {
                return (state, Vec::new());
            }
            match result {
                Ok(report) if report.success => apply_success(&mut state, report),
                Ok(report) => {
                    let reason = report
                        .message
                        .filter(|message| !message.trim().is_empty())
                        .unwrap_or_else(|| CONVERSION_FAILED_FALLBACK.to_string());
                    state.set_status(RequestStatus::Error(format!("Error: {reason}")));
                    Vec::new()
                }
                Err(SubmitFailure::Transport(reason)) => {
                    state.set_status(RequestStatus::Error(format!(
                        "Network error or server unavailable: {reason}"
                    )));
                    Vec::new()
                }
                Err(SubmitFailure::LocalFile(reason)) => {
                    state.set_status(RequestStatus::Error(format!("Local file error: {reason}")));
                    Vec::new()
                }
            }
        }
        Msg::ResetClicked => {
            if state.reset() {
                vec![Effect::CancelPending]
            } else {
                Vec::new()
            }
        }
        Msg::ResultSelected(file) => {
            let url = file.url.clone();
            let request_id = state.select(file);
            vec![Effect::FetchMarkdown { request_id, url }]
        }
        Msg::MarkdownFinished { request_id, result } => {
            let next = match result {
                Ok(text) => PreviewState::Content { text },
                Err(message) if message.trim().is_empty() => PreviewState::Failed {
                    message: PREVIEW_FAILED_FALLBACK.to_string(),
                },
                Err(message) => PreviewState::Failed { message },
            };
            state.finish_preview(request_id, next);
            Vec::new()
        }
        Msg::EditorChanged(text) => {
            state.edit_content(text);
            Vec::new()
        }
        Msg::DownloadClicked => match state.selection() {
            Some(file) => vec![Effect::OpenExternal {
                url: file.url.clone(),
            }],
            None => Vec::new(),
        },
    };

    (state, effects)
}

fn apply_success(state: &mut AppState, report: ConversionReport) -> Vec<Effect> {
    let text = match report.message.as_deref().map(str::trim) {
        Some(note) if !note.is_empty() => format!("{CONVERSION_SUCCESS} {note}"),
        _ => CONVERSION_SUCCESS.to_string(),
    };
    state.set_status(RequestStatus::Success(text));

    let first = report.files.first().cloned();
    state.accept_results(report.files);
    match first {
        Some(file) => {
            let url = file.url.clone();
            let request_id = state.select(file);
            vec![Effect::FetchMarkdown { request_id, url }]
        }
        None => Vec::new(),
    }
}
