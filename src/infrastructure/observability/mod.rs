mod init_tracing;
mod prompt_sanitizer;
mod request_id;
mod tracing_config;

pub use init_tracing::init_tracing;
pub use prompt_sanitizer::{mask_email, sanitize_prompt};
pub use request_id::{
    REQUEST_ID_HEADER, propagate_request_id_layer, request_span, set_request_id_layer,
};
pub use tracing_config::{DEFAULT_FILTER, TracingConfig};
