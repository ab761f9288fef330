use axum::Router;
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::{
    propagate_request_id_layer, request_span, set_request_id_layer,
};
use crate::presentation::handlers::{health_handler, process_handler, usage_handler};
use crate::presentation::state::AppState;

/// `/process` gets its own body limit; uploads go through it alone.
pub fn create_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    let api = Router::new()
        .route("/health", get(health_handler))
        .route("/process", post(process_handler).layer(upload_limit))
        .route("/usage", get(usage_handler));

    let api = match &state.media_dir {
        Some(dir) => api.nest_service("/media", ServeDir::new(dir)),
        None => api,
    };

    let trace = TraceLayer::new_for_http()
        .make_span_with(request_span::<Body>)
        .on_response(DefaultOnResponse::new().level(Level::INFO))
        .on_failure(DefaultOnFailure::new().level(Level::ERROR));

    // Later layers wrap earlier ones: the id is set before the span opens.
    api.layer(propagate_request_id_layer())
        .layer(trace)
        .layer(set_request_id_layer())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
