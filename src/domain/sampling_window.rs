use super::{FramePolicy, MediaKind};

/// Frames skipped at the start of every video while the camera settles.
pub const VIDEO_WARMUP_FRAMES: usize = 25;

/// Which decoded frames get sent upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingWindow {
    pub offset: usize,
    pub stride: usize,
    pub limit: usize,
}

impl SamplingWindow {
    pub fn compute(frame_count: usize, kind: MediaKind, policy: FramePolicy) -> Self {
        match (policy, kind) {
            (FramePolicy::FirstFrameOnly, _) => Self {
                offset: 0,
                stride: 1,
                limit: 1,
            },
            (FramePolicy::Sampled { max_frames }, MediaKind::Video) => {
                let max_frames = max_frames.max(1);
                Self {
                    offset: VIDEO_WARMUP_FRAMES,
                    stride: (frame_count / max_frames).max(1),
                    limit: max_frames,
                }
            }
            (FramePolicy::Sampled { max_frames }, MediaKind::Image) => Self {
                offset: 0,
                stride: 1,
                limit: max_frames.max(1),
            },
        }
    }

    pub fn indices(&self, frame_count: usize) -> impl Iterator<Item = usize> {
        let offset = self.offset;
        (offset..frame_count).step_by(self.stride).take(self.limit)
    }

    pub fn selected_count(&self, frame_count: usize) -> usize {
        self.indices(frame_count).count()
    }
}
