use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::infrastructure::observability::mask_email;
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UsageQuery {
    pub email: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

#[tracing::instrument(skip(state, query))]
pub async fn usage_handler(
    State(state): State<AppState>,
    query: Result<Query<UsageQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Rejected usage query");
            return error_response(rejection.status(), rejection.body_text());
        }
    };

    tracing::debug!(email = %mask_email(&query.email), "Loading usage records");
    match state.process_service.usage(&query.email).await {
        Ok(records) => {
            tracing::debug!(count = records.len(), "Usage records loaded");
            (StatusCode::OK, Json(records)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load usage records");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
