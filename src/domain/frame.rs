use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;

/// Wire form a backend expects its frames in. Frames are always JPEG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEncoding {
    Base64Jpeg,
    RawJpeg,
}

/// How many frames a backend accepts per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramePolicy {
    Sampled { max_frames: usize },
    FirstFrameOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedFrame {
    Base64(String),
    Raw(Bytes),
}

impl EncodedFrame {
    pub const MEDIA_TYPE: &'static str = "image/jpeg";

    pub fn encode(jpeg: Bytes, encoding: FrameEncoding) -> Self {
        match encoding {
            FrameEncoding::Base64Jpeg => Self::Base64(general_purpose::STANDARD.encode(&jpeg)),
            FrameEncoding::RawJpeg => Self::Raw(jpeg),
        }
    }

    pub fn as_base64(&self) -> String {
        match self {
            Self::Base64(text) => text.clone(),
            Self::Raw(bytes) => general_purpose::STANDARD.encode(bytes),
        }
    }

    pub fn to_jpeg_bytes(&self) -> Result<Bytes, base64::DecodeError> {
        match self {
            Self::Base64(text) => general_purpose::STANDARD.decode(text).map(Bytes::from),
            Self::Raw(bytes) => Ok(bytes.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameSequence {
    frames: Vec<EncodedFrame>,
    decoded_count: usize,
}

impl FrameSequence {
    pub fn new(frames: Vec<EncodedFrame>, decoded_count: usize) -> Self {
        Self {
            frames,
            decoded_count,
        }
    }

    pub fn single(frame: EncodedFrame) -> Self {
        Self::new(vec![frame], 1)
    }

    pub fn frames(&self) -> &[EncodedFrame] {
        &self.frames
    }

    pub fn first(&self) -> Option<&EncodedFrame> {
        self.frames.first()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames decoded from the media before sampling.
    pub fn decoded_count(&self) -> usize {
        self.decoded_count
    }

    pub fn into_frames(self) -> Vec<EncodedFrame> {
        self.frames
    }
}
