use std::sync::Once;

use converter_core::{
    update, AppState, ConversionReport, ConvertedFile, Effect, LocalFile, Msg, RequestStatus,
    SubmitFailure, CONVERSION_SUCCESS, NO_FILES_WARNING,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

fn pdf(name: &str) -> LocalFile {
    LocalFile::from_bytes(name, None, b"%PDF-1.4".to_vec().into())
}

fn drop_files(state: AppState, files: Vec<LocalFile>) -> (AppState, Vec<Effect>) {
    update(state, Msg::FilesAdded(files))
}

fn submit(state: AppState) -> (AppState, u64, Vec<LocalFile>) {
    let (state, effects) = update(state, Msg::SubmitClicked);
    match effects.as_slice() {
        [Effect::SubmitConversion { request_id, files }] => (state, *request_id, files.clone()),
        other => panic!("expected one SubmitConversion effect, got {other:?}"),
    }
}

fn report(files: Vec<ConvertedFile>) -> ConversionReport {
    ConversionReport {
        success: true,
        files,
        message: None,
    }
}

#[test]
fn drop_keeps_only_pdfs() {
    init_logging();
    let dropped = vec![
        pdf("a.pdf"),
        pdf("b.txt"),
        pdf("REPORT.PDF"),
        LocalFile::from_bytes("scan", Some("Application/PDF".into()), b"x".to_vec().into()),
        LocalFile::from_bytes("notes.md", Some("text/markdown".into()), b"x".to_vec().into()),
        LocalFile::from_path("/tmp/pdf"),
    ];

    let (state, effects) = drop_files(AppState::new(), dropped);

    assert!(effects.is_empty());
    assert_eq!(
        state.view().pending_files,
        vec!["a.pdf".to_string(), "REPORT.PDF".into(), "scan".into()]
    );
}

#[test]
fn drop_replaces_previous_selection() {
    init_logging();
    let (state, _) = drop_files(AppState::new(), vec![pdf("a.pdf"), pdf("b.pdf")]);
    let (state, _) = drop_files(state, vec![pdf("c.pdf")]);

    assert_eq!(state.view().pending_files, vec!["c.pdf".to_string()]);

    let (state, _) = drop_files(state, vec![pdf("d.txt")]);
    assert!(state.view().pending_files.is_empty());
    assert!(!state.view().can_submit);
}

#[test]
fn submit_without_files_warns_without_effects() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert!(!state.in_flight());
    assert_eq!(
        state.view().status,
        RequestStatus::Warning(NO_FILES_WARNING.to_string())
    );
    assert!(state.consume_dirty());
}

#[test]
fn submit_sends_all_pending_files_and_marks_in_flight() {
    init_logging();
    let (state, _) = drop_files(AppState::new(), vec![pdf("a.pdf"), pdf("b.pdf")]);
    let (state, request_id, files) = submit(state);

    assert_eq!(request_id, 1);
    assert_eq!(files, vec![pdf("a.pdf"), pdf("b.pdf")]);
    let view = state.view();
    assert!(view.in_flight);
    assert!(!view.can_submit);
    assert_eq!(view.pending_files.len(), 2);
}

#[test]
fn second_submit_while_in_flight_is_ignored() {
    init_logging();
    let (state, _) = drop_files(AppState::new(), vec![pdf("a.pdf")]);
    let (mut state, _, _) = submit(state);
    state.consume_dirty();

    let (mut state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
    assert!(state.in_flight());
    assert!(!state.consume_dirty());
}

#[test]
fn successful_conversion_selects_first_and_switches_to_preview() {
    init_logging();
    let (state, _) = drop_files(AppState::new(), vec![pdf("a.pdf"), pdf("b.txt")]);
    let (state, request_id, _) = submit(state);
    let first = ConvertedFile::new("a.md", "/out/a.md");
    let second = ConvertedFile::new("b.md", "/out/b.md");

    let (state, effects) = update(
        state,
        Msg::ConversionFinished {
            request_id,
            result: Ok(report(vec![first.clone(), second.clone()])),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::FetchMarkdown {
            request_id: 2,
            url: "/out/a.md".to_string(),
        }]
    );
    let view = state.view();
    assert!(!view.in_flight);
    assert!(!view.show_upload);
    assert!(view.pending_files.is_empty());
    assert_eq!(
        view.status,
        RequestStatus::Success(CONVERSION_SUCCESS.to_string())
    );
    assert_eq!(state.selection(), Some(&first));
    let active: Vec<bool> = view.results.iter().map(|row| row.active).collect();
    assert_eq!(active, vec![true, false]);
    assert_eq!(view.results[1].file, second);
}

#[test]
fn successful_conversion_with_no_files_still_leaves_upload() {
    init_logging();
    let (state, _) = drop_files(AppState::new(), vec![pdf("a.pdf")]);
    let (state, request_id, _) = submit(state);

    let (state, effects) = update(
        state,
        Msg::ConversionFinished {
            request_id,
            result: Ok(report(Vec::new())),
        },
    );

    assert!(effects.is_empty());
    assert!(!state.show_upload());
    assert!(state.selection().is_none());
}

#[test]
fn partial_success_appends_server_note() {
    init_logging();
    let (state, _) = drop_files(AppState::new(), vec![pdf("a.pdf"), pdf("b.pdf")]);
    let (state, request_id, _) = submit(state);

    let (state, _) = update(
        state,
        Msg::ConversionFinished {
            request_id,
            result: Ok(ConversionReport {
                success: true,
                files: vec![ConvertedFile::new("a.md", "/out/a.md")],
                message: Some("Partial success. Errors: b.pdf broken".into()),
            }),
        },
    );

    assert_eq!(
        state.status(),
        &RequestStatus::Success(format!(
            "{CONVERSION_SUCCESS} Partial success. Errors: b.pdf broken"
        ))
    );
}

#[test]
fn business_failure_keeps_pending_files_and_upload_view() {
    init_logging();
    let (state, _) = drop_files(AppState::new(), vec![pdf("a.pdf")]);
    let (state, request_id, _) = submit(state);

    let (state, effects) = update(
        state,
        Msg::ConversionFinished {
            request_id,
            result: Ok(ConversionReport {
                success: false,
                files: Vec::new(),
                message: Some("No valid PDF files found to convert.".into()),
            }),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert!(view.show_upload);
    assert!(!view.in_flight);
    assert!(view.can_submit);
    assert_eq!(view.pending_files, vec!["a.pdf".to_string()]);
    assert_eq!(
        view.status,
        RequestStatus::Error("Error: No valid PDF files found to convert.".into())
    );
}

#[test]
fn business_failure_without_message_uses_fallback() {
    init_logging();
    let (state, _) = drop_files(AppState::new(), vec![pdf("a.pdf")]);
    let (state, request_id, _) = submit(state);

    let (state, _) = update(
        state,
        Msg::ConversionFinished {
            request_id,
            result: Ok(ConversionReport::default()),
        },
    );

    assert_eq!(
        state.status(),
        &RequestStatus::Error("Error: Conversion failed.".into())
    );
}

#[test]
fn transport_failure_reports_error_text() {
    init_logging();
    let (state, _) = drop_files(AppState::new(), vec![pdf("a.pdf")]);
    let (state, request_id, _) = submit(state);

    let (state, _) = update(
        state,
        Msg::ConversionFinished {
            request_id,
            result: Err(SubmitFailure::Transport("connection refused".into())),
        },
    );

    let view = state.view();
    assert!(!view.in_flight);
    assert!(view.show_upload);
    assert_eq!(view.pending_files, vec!["a.pdf".to_string()]);
    assert_eq!(
        view.status,
        RequestStatus::Error("Network error or server unavailable: connection refused".into())
    );
}

#[test]
fn unreadable_local_file_is_not_reported_as_network_error() {
    init_logging();
    let (state, _) = drop_files(AppState::new(), vec![pdf("gone.pdf")]);
    let (state, request_id, _) = submit(state);

    let (state, _) = update(
        state,
        Msg::ConversionFinished {
            request_id,
            result: Err(SubmitFailure::LocalFile(
                "could not read /tmp/gone.pdf: No such file or directory".into(),
            )),
        },
    );

    let view = state.view();
    assert!(!view.in_flight);
    assert!(view.show_upload);
    assert_eq!(
        view.status,
        RequestStatus::Error(
            "Local file error: could not read /tmp/gone.pdf: No such file or directory".into()
        )
    );
}

#[test]
fn stale_conversion_result_is_discarded() {
    init_logging();
    let (state, _) = drop_files(AppState::new(), vec![pdf("a.pdf")]);
    let (state, request_id, _) = submit(state);

    let (mut state, effects) = update(
        state,
        Msg::ConversionFinished {
            request_id: request_id + 40,
            result: Ok(report(vec![ConvertedFile::new("x.md", "/out/x.md")])),
        },
    );
    state.consume_dirty();

    assert!(effects.is_empty());
    assert!(state.in_flight());
    assert!(state.results().is_empty());
}

#[test]
fn drop_clears_status_and_previous_results() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::SubmitClicked);
    assert!(matches!(state.status(), RequestStatus::Warning(_)));

    let (state, _) = drop_files(state, vec![pdf("a.pdf")]);
    assert_eq!(state.status(), &RequestStatus::Idle);

    let (state, request_id, _) = submit(state);
    let (state, _) = update(
        state,
        Msg::ConversionFinished {
            request_id,
            result: Ok(report(vec![ConvertedFile::new("a.md", "/out/a.md")])),
        },
    );
    let (state, _) = drop_files(state, vec![pdf("b.pdf")]);

    assert!(state.results().is_empty());
    assert!(state.selection().is_none());
    assert_eq!(state.status(), &RequestStatus::Idle);
}

#[test]
fn reset_returns_to_clean_upload_view() {
    init_logging();
    let (state, _) = drop_files(AppState::new(), vec![pdf("a.pdf")]);
    let (state, request_id, _) = submit(state);
    let (state, _) = update(
        state,
        Msg::ConversionFinished {
            request_id,
            result: Ok(report(vec![ConvertedFile::new("a.md", "/out/a.md")])),
        },
    );

    let (state, effects) = update(state, Msg::ResetClicked);
    // The preview fetch for a.md was still outstanding.
    assert_eq!(effects, vec![Effect::CancelPending]);

    let view = state.view();
    assert!(view.pending_files.is_empty());
    assert!(view.results.is_empty());
    assert!(state.selection().is_none());
    assert!(view.show_upload);
    assert_eq!(view.status, RequestStatus::Idle);

    let (mut again, effects) = update(state.clone(), Msg::ResetClicked);
    again.consume_dirty();
    let mut state = state;
    state.consume_dirty();
    assert!(effects.is_empty());
    assert_eq!(again, state);
}

#[test]
fn reset_during_conversion_drops_late_response() {
    init_logging();
    let (state, _) = drop_files(AppState::new(), vec![pdf("a.pdf")]);
    let (state, request_id, _) = submit(state);

    let (state, effects) = update(state, Msg::ResetClicked);
    assert_eq!(effects, vec![Effect::CancelPending]);
    assert!(!state.in_flight());

    let (state, effects) = update(
        state,
        Msg::ConversionFinished {
            request_id,
            result: Ok(report(vec![ConvertedFile::new("a.md", "/out/a.md")])),
        },
    );
    assert!(effects.is_empty());
    assert!(state.show_upload());
    assert!(state.results().is_empty());
}
