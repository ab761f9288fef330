use std::io;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;

use crate::application::ports::{FrameDecodeError, FrameDecoder};
use crate::domain::{
    EncodedFrame, FrameEncoding, FramePolicy, FrameSequence, MediaInput, MediaKind,
    SamplingWindow,
};

use super::ScratchSpace;

pub struct FrameSampler {
    decoder: Arc<dyn FrameDecoder>,
    timeout: Duration,
}

impl FrameSampler {
    pub fn new(decoder: Arc<dyn FrameDecoder>, timeout: Duration) -> Self {
        Self { decoder, timeout }
    }

    /// Writes the media into `scratch`, decodes it and keeps the frames the
    /// policy selects, encoded the way the backend wants them.
    #[tracing::instrument(
        skip(self, media, scratch),
        fields(kind = media.kind.as_str(), bytes = media.data.len())
    )]
    pub async fn extract_frames(
        &self,
        media: &MediaInput,
        scratch: &ScratchSpace,
        policy: FramePolicy,
        encoding: FrameEncoding,
    ) -> Result<FrameSequence, SamplingError> {
        let source = scratch
            .write_media(media)
            .await
            .map_err(SamplingError::Scratch)?;

        match media.kind {
            MediaKind::Image => {
                let jpeg = tokio::time::timeout(
                    self.timeout,
                    self.decoder.decode_image(media.data.clone()),
                )
                .await
                .map_err(|_| SamplingError::Timeout(self.timeout))??;

                Ok(FrameSequence::single(EncodedFrame::encode(jpeg, encoding)))
            }
            MediaKind::Video => {
                let frames_dir = scratch.frames_dir();
                tokio::fs::create_dir_all(&frames_dir)
                    .await
                    .map_err(SamplingError::Scratch)?;

                let frame_paths = tokio::time::timeout(
                    self.timeout,
                    self.decoder.decode_video(&source, &frames_dir),
                )
                .await
                .map_err(|_| SamplingError::Timeout(self.timeout))??;

                let decoded = frame_paths.len();
                let window = SamplingWindow::compute(decoded, MediaKind::Video, policy);
                let mut frames = Vec::with_capacity(window.selected_count(decoded));

                for index in window.indices(decoded) {
                    let jpeg = tokio::fs::read(&frame_paths[index])
                        .await
                        .map_err(SamplingError::Scratch)?;
                    frames.push(EncodedFrame::encode(Bytes::from(jpeg), encoding));
                }

                tracing::debug!(
                    decoded,
                    selected = frames.len(),
                    offset = window.offset,
                    stride = window.stride,
                    "Video frames sampled"
                );

                Ok(FrameSequence::new(frames, decoded))
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SamplingError {
    #[error("unsupported media: {0}")]
    UnsupportedMedia(String),
    #[error("frame decoder unavailable: {0}")]
    DecoderUnavailable(String),
    #[error("frame extraction timed out after {0:?}")]
    Timeout(Duration),
    #[error("scratch storage error: {0}")]
    Scratch(io::Error),
}

impl From<FrameDecodeError> for SamplingError {
    fn from(e: FrameDecodeError) -> Self {
        match e {
            FrameDecodeError::UnsupportedMedia(msg) => Self::UnsupportedMedia(msg),
            FrameDecodeError::DecoderUnavailable(msg) => Self::DecoderUnavailable(msg),
            FrameDecodeError::Io(e) => Self::Scratch(e),
        }
    }
}
