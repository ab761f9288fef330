mod analysis;
mod frame;
mod media;
mod outcome;
mod provider_id;
mod sampling_window;
mod usage_record;

pub use analysis::{
    AsticaAnalysis, FaceDemographics, FaceEmotions, GoogleVisionAnalysis, Moderation,
    RekognitionDetections, ScoredLabel,
};
pub use frame::{EncodedFrame, FrameEncoding, FramePolicy, FrameSequence};
pub use media::{MediaError, MediaInput, MediaKind};
pub use outcome::{DEFAULT_FAILURE_STATUS, FailureBody, Outcome};
pub use provider_id::ProviderId;
pub use sampling_window::{SamplingWindow, VIDEO_WARMUP_FRAMES};
pub use usage_record::UsageRecord;
