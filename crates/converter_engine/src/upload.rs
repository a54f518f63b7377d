use client_logging::{client_debug, client_info, client_warn};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::client::{buffer_response, map_reqwest_error};
use crate::settings::{CONVERT_PATH, FILES_FIELD};
use crate::{ClientSettings, ConversionReply, FailureKind, RequestError, UploadFile};

const DEFAULT_UPLOAD_MIME: &str = "application/pdf";

#[async_trait::async_trait]
pub trait Uploader: Send + Sync {
    /// Sends every file in one multipart request and decodes the server's reply.
    async fn convert(&self, files: &[UploadFile]) -> Result<ConversionReply, RequestError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestUploader {
    settings: ClientSettings,
}

impl ReqwestUploader {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    async fn build_form(&self, files: &[UploadFile]) -> Result<Form, RequestError> {
        let mut form = Form::new();
        for file in files {
            let bytes = file.read().await?;
            let mime = file.mime.as_deref().unwrap_or(DEFAULT_UPLOAD_MIME);
            let part = Part::bytes(bytes)
                .file_name(file.name.clone())
                .mime_str(mime)
                .map_err(|err| {
                    RequestError::new(
                        FailureKind::InvalidFormat,
                        format!("invalid mime type {mime:?} for {}: {err}", file.name),
                    )
                })?;
            form = form.part(FILES_FIELD, part);
        }
        Ok(form)
    }
}

/// The only field read from a non-2xx conversion body.
#[derive(Deserialize)]
struct RejectionBody {
    message: Option<String>,
}

#[async_trait::async_trait]
impl Uploader for ReqwestUploader {
    async fn convert(&self, files: &[UploadFile]) -> Result<ConversionReply, RequestError> {
        let url = self.settings.resolve(CONVERT_PATH)?;
        let client = self.settings.build_client()?;
        let form = self.build_form(files).await?;

        client_info!("POST {} with {} file(s)", url, files.len());
        let response = client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = buffer_response(response, self.settings.max_bytes).await?;
        client_debug!(
            "convert answered {} ({} bytes)",
            response.status,
            response.body.len()
        );

        if !response.status.is_success() {
            let server_message = serde_json::from_slice::<RejectionBody>(&response.body)
                .ok()
                .and_then(|body| body.message)
                .filter(|message| !message.trim().is_empty());
            let message = match server_message {
                Some(detail) => {
                    format!("request failed with status {}: {detail}", response.status)
                }
                None => format!("request failed with status {}", response.status),
            };
            client_warn!("convert rejected: {}", message);
            return Err(RequestError::new(
                FailureKind::HttpStatus(response.status.as_u16()),
                message,
            ));
        }

        serde_json::from_slice::<ConversionReply>(&response.body).map_err(|err| {
            RequestError::new(
                FailureKind::InvalidFormat,
                format!("malformed conversion response: {err}"),
            )
        })
    }
}
