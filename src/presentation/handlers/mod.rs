mod health;
mod process;
mod usage;

pub use health::{HealthResponse, health_handler};
pub use process::process_handler;
pub use usage::{ErrorResponse, UsageQuery, usage_handler};
