use std::path::PathBuf;
use std::sync::Arc;

use crate::application::services::ProcessService;

#[derive(Clone)]
pub struct AppState {
    pub process_service: Arc<ProcessService>,
    pub max_upload_bytes: usize,
    /// Served under `/media` when uploads are kept on local disk.
    pub media_dir: Option<PathBuf>,
}
