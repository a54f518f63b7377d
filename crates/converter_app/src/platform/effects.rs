use bytes::Bytes;
use client_logging::{client_error, client_info, client_warn};
use converter_core::{
    ConversionReport, ConvertedFile, Effect, FileSource, LocalFile, Msg, SubmitFailure,
};
use converter_engine::{
    ClientSettings, ConversionReply, EngineEvent, EngineHandle, FailureKind, RequestError,
    UploadFile, UploadSource,
};

/// Executes core effects against the engine and the desktop, and turns engine
/// events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    settings: ClientSettings,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings) -> std::io::Result<Self> {
        let engine = EngineHandle::new(settings.clone())?;
        Ok(Self { engine, settings })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitConversion { request_id, files } => {
                    client_info!(
                        "SubmitConversion request_id={} files={}",
                        request_id,
                        files.len()
                    );
                    let uploads = files.into_iter().map(to_upload).collect();
                    self.engine.convert(request_id, uploads);
                }
                Effect::FetchMarkdown { request_id, url } => {
                    client_info!("FetchMarkdown request_id={} url={}", request_id, url);
                    self.engine.fetch_markdown(request_id, url);
                }
                Effect::OpenExternal { url } => self.open_external(&url),
                Effect::CancelPending => self.engine.cancel_all(),
            }
        }
    }

    /// Collects every engine event that arrived since the last frame.
    pub fn drain_events(&self) -> Vec<Msg> {
        std::iter::from_fn(|| self.engine.try_recv())
            .map(event_to_msg)
            .collect()
    }

    fn open_external(&self, url: &str) {
        let resolved = match self.settings.resolve(url) {
            Ok(resolved) => resolved,
            Err(err) => {
                client_warn!("Cannot open {}: {}", url, err);
                return;
            }
        };
        client_info!("Opening {} in the system browser", resolved);
        if let Err(err) = open::that(resolved.as_str()) {
            client_error!("Failed to open {}: {}", resolved, err);
        }
    }
}

fn to_upload(file: LocalFile) -> UploadFile {
    let source = match file.source {
        FileSource::Path(path) => UploadSource::Path(path),
        FileSource::Memory(bytes) => UploadSource::Bytes(Bytes::copy_from_slice(&bytes)),
    };
    UploadFile {
        name: file.name,
        mime: file.mime,
        source,
    }
}

fn to_report(reply: ConversionReply) -> ConversionReport {
    ConversionReport {
        success: reply.success,
        files: reply
            .files
            .unwrap_or_default()
            .into_iter()
            .map(|file| ConvertedFile::new(file.name, file.url))
            .collect(),
        message: reply.message,
    }
}

fn to_submit_failure(err: RequestError) -> SubmitFailure {
    match err.kind {
        FailureKind::Io => SubmitFailure::LocalFile(err.message),
        _ => SubmitFailure::Transport(err.message),
    }
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ConversionCompleted { request_id, result } => {
            if let Err(err) = &result {
                client_warn!("Conversion {} failed ({}): {}", request_id, err.kind, err);
            }
            Msg::ConversionFinished {
                request_id,
                result: result.map(to_report).map_err(to_submit_failure),
            }
        }
        EngineEvent::MarkdownCompleted { request_id, result } => Msg::MarkdownFinished {
            request_id,
            result: result.map_err(|err| err.to_string()),
        },
    }
}
