mod in_memory_usage_log;
mod pg_pool;
mod pg_usage_log;

pub use in_memory_usage_log::InMemoryUsageLog;
pub use pg_pool::{create_pool, run_migrations};
pub use pg_usage_log::PgUsageLog;
