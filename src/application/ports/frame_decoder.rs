use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;

#[async_trait]
pub trait FrameDecoder: Send + Sync {
    /// Decodes a still image and returns it as JPEG.
    async fn decode_image(&self, data: Bytes) -> Result<Bytes, FrameDecodeError>;

    /// Decodes every frame of the video at `source` into `frames_dir` as JPEG files.
    ///
    /// Paths are returned in capture order. A decode error anywhere in the
    /// stream fails the whole call; partial frame sets are never returned.
    async fn decode_video(
        &self,
        source: &Path,
        frames_dir: &Path,
    ) -> Result<Vec<PathBuf>, FrameDecodeError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FrameDecodeError {
    #[error("unsupported media: {0}")]
    UnsupportedMedia(String),
    #[error("decoder unavailable: {0}")]
    DecoderUnavailable(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
