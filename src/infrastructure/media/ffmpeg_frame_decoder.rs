use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::process::Command;

use crate::application::ports::{FrameDecodeError, FrameDecoder};

use super::jpeg_transcoder::to_jpeg;

const FRAME_PATTERN: &str = "frame_%06d.jpg";

/// Decodes stills in-process and shells out to `ffmpeg` for video.
pub struct FfmpegFrameDecoder {
    binary: PathBuf,
}

impl FfmpegFrameDecoder {
    pub const DEFAULT_BINARY: &'static str = "ffmpeg";

    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    async fn collect_frames(frames_dir: &Path) -> Result<Vec<PathBuf>, FrameDecodeError> {
        let mut entries = tokio::fs::read_dir(frames_dir).await?;
        let mut frames = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "jpg") {
                frames.push(path);
            }
        }
        // Zero-padded names sort in capture order.
        frames.sort();
        Ok(frames)
    }
}

impl Default for FfmpegFrameDecoder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BINARY)
    }
}

#[async_trait]
impl FrameDecoder for FfmpegFrameDecoder {
    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    async fn decode_image(&self, data: Bytes) -> Result<Bytes, FrameDecodeError> {
        let jpeg = tokio::task::spawn_blocking(move || to_jpeg(&data))
            .await
            .map_err(|e| FrameDecodeError::UnsupportedMedia(format!("task join error: {e}")))??;
        Ok(Bytes::from(jpeg))
    }

    #[tracing::instrument(skip(self), fields(binary = %self.binary.display()))]
    async fn decode_video(
        &self,
        source: &Path,
        frames_dir: &Path,
    ) -> Result<Vec<PathBuf>, FrameDecodeError> {
        let output = Command::new(&self.binary)
            .arg("-nostdin")
            .args(["-v", "error", "-xerror", "-err_detect", "explode"])
            .arg("-i")
            .arg(source)
            .args(["-vsync", "0", "-q:v", "2", "-f", "image2"])
            .arg(frames_dir.join(FRAME_PATTERN))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => FrameDecodeError::DecoderUnavailable(format!(
                    "{} not found on PATH",
                    self.binary.display()
                )),
                _ => FrameDecodeError::Io(e),
            })?;

        // Under `-v error` any stderr output is a decode error, even with a zero exit.
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() || !stderr.trim().is_empty() {
            tracing::warn!(status = %output.status, stderr = %stderr.trim(), "ffmpeg rejected input");
            return Err(FrameDecodeError::UnsupportedMedia(format!(
                "video decode failed: {}",
                stderr.trim()
            )));
        }

        let frames = Self::collect_frames(frames_dir).await?;
        tracing::debug!(frame_count = frames.len(), "Video decoded");
        Ok(frames)
    }
}
