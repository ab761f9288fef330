use axum::Json;
use axum::extract::multipart::Field;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::services::{ProcessError, ProcessRequest};
use crate::domain::{DEFAULT_FAILURE_STATUS, FailureBody, MediaError, MediaInput, MediaKind};
use crate::infrastructure::observability::{mask_email, sanitize_prompt};
use crate::presentation::state::AppState;

#[derive(Default)]
struct ProcessForm {
    text: Option<String>,
    email: Option<String>,
    selected_api: Option<String>,
    file: Option<MediaInput>,
}

impl ProcessForm {
    fn into_request(self) -> Result<ProcessRequest, String> {
        Ok(ProcessRequest {
            prompt: self.text.ok_or("Missing form field: text")?,
            email: self.email.ok_or("Missing form field: email")?,
            provider: self.selected_api.ok_or("Missing form field: selected_api")?,
            media: self.file.ok_or("Missing form field: file")?,
        })
    }
}

fn failure(status: StatusCode, status_code: u16, message: impl Into<String>) -> Response {
    (status, Json(FailureBody::new(status_code, message))).into_response()
}

fn bad_request(message: impl Into<String>) -> Response {
    failure(StatusCode::BAD_REQUEST, DEFAULT_FAILURE_STATUS, message)
}

async fn read_text(field: Field<'_>) -> Result<String, Response> {
    field
        .text()
        .await
        .map(|value| value.trim().to_string())
        .map_err(|e| bad_request(format!("Failed to read form field: {e}")))
}

async fn read_form(multipart: &mut Multipart) -> Result<ProcessForm, Response> {
    let mut form = ProcessForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return Err(bad_request(format!("Failed to read multipart: {e}")));
            }
        };

        match field.name().unwrap_or_default() {
            "text" => form.text = Some(read_text(field).await?),
            "email" => form.email = Some(read_text(field).await?),
            "selected_api" => form.selected_api = Some(read_text(field).await?),
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();

                // Reject before anything is buffered or written to scratch.
                if MediaKind::from_mime(&content_type).is_none() {
                    tracing::warn!(content_type = %content_type, "Unsupported media type");
                    return Err(bad_request(
                        MediaError::InvalidMediaType(content_type).to_string(),
                    ));
                }

                let data = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(format!("Failed to read file: {e}")))?;
                let media = MediaInput::new(filename, content_type, data)
                    .map_err(|e| bad_request(e.to_string()))?;
                form.file = Some(media);
            }
            other => tracing::debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(form)
}

#[tracing::instrument(skip(state, multipart))]
pub async fn process_handler(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let form = match read_form(&mut multipart).await {
        Ok(form) => form,
        Err(response) => return response,
    };

    let request = match form.into_request() {
        Ok(request) => request,
        Err(message) => {
            tracing::warn!(message, "Incomplete process request");
            return bad_request(message);
        }
    };

    tracing::info!(
        provider = %request.provider,
        email = %mask_email(&request.email),
        prompt = %sanitize_prompt(&request.prompt),
        kind = request.media.kind.as_str(),
        bytes = request.media.data.len(),
        "Process request received"
    );

    match state.process_service.process(request).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => {
            let status = match e {
                ProcessError::Scratch(_) => StatusCode::INTERNAL_SERVER_ERROR,
                ProcessError::Failed { .. } => StatusCode::BAD_REQUEST,
            };
            failure(status, e.status_code(), e.to_string())
        }
    }
}
