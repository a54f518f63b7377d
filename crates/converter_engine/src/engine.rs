use std::future::Future;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use client_logging::{client_debug, client_info};
use tokio_util::sync::CancellationToken;

use crate::fetch::{Fetcher, ReqwestFetcher};
use crate::upload::{ReqwestUploader, Uploader};
use crate::{ClientSettings, EngineEvent, RequestId, UploadFile};

enum EngineCommand {
    Convert {
        request_id: RequestId,
        files: Vec<UploadFile>,
    },
    FetchMarkdown {
        request_id: RequestId,
        url: String,
    },
    CancelAll,
}

/// Runs requests on a background tokio runtime and reports their outcomes.
///
/// Starting a markdown fetch abandons the previous one; `cancel_all` abandons
/// everything. Abandoned requests never produce an event.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> std::io::Result<Self> {
        Self::with_backends(
            Arc::new(ReqwestUploader::new(settings.clone())),
            Arc::new(ReqwestFetcher::new(settings)),
        )
    }

    pub fn with_backends(
        uploader: Arc<dyn Uploader>,
        fetcher: Arc<dyn Fetcher>,
    ) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("converter-engine".into())
            .spawn(move || {
                let mut session = CancellationToken::new();
                let mut preview = session.child_token();

                while let Ok(command) = cmd_rx.recv() {
                    match command {
                        EngineCommand::Convert { request_id, files } => {
                            let uploader = uploader.clone();
                            let event_tx = event_tx.clone();
                            let token = session.child_token();
                            runtime.spawn(async move {
                                let outcome =
                                    run_until_cancelled(token, uploader.convert(&files)).await;
                                match outcome {
                                    Some(result) => {
                                        let _ = event_tx.send(EngineEvent::ConversionCompleted {
                                            request_id,
                                            result,
                                        });
                                    }
                                    None => client_debug!("conversion {} cancelled", request_id),
                                }
                            });
                        }
                        EngineCommand::FetchMarkdown { request_id, url } => {
                            preview.cancel();
                            preview = session.child_token();
                            let fetcher = fetcher.clone();
                            let event_tx = event_tx.clone();
                            let token = preview.clone();
                            runtime.spawn(async move {
                                let outcome =
                                    run_until_cancelled(token, fetcher.fetch_markdown(&url)).await;
                                match outcome {
                                    Some(result) => {
                                        let _ = event_tx.send(EngineEvent::MarkdownCompleted {
                                            request_id,
                                            result,
                                        });
                                    }
                                    None => {
                                        client_debug!("markdown fetch {} cancelled", request_id)
                                    }
                                }
                            });
                        }
                        EngineCommand::CancelAll => {
                            client_info!("cancelling outstanding requests");
                            session.cancel();
                            session = CancellationToken::new();
                            preview = session.child_token();
                        }
                    }
                }
                session.cancel();
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn convert(&self, request_id: RequestId, files: Vec<UploadFile>) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Convert { request_id, files });
    }

    pub fn fetch_markdown(&self, request_id: RequestId, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::FetchMarkdown {
            request_id,
            url: url.into(),
        });
    }

    pub fn cancel_all(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CancelAll);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn run_until_cancelled<T>(
    token: CancellationToken,
    work: impl Future<Output = T>,
) -> Option<T> {
    tokio::select! {
        _ = token.cancelled() => None,
        output = work => Some(output),
    }
}
