use bytes::Bytes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Derives the kind from a declared content type, by prefix only.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            Some(Self::Image)
        } else if mime.starts_with("video/") {
            Some(Self::Video)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, Self::Video)
    }
}

#[derive(Debug, Clone)]
pub struct MediaInput {
    pub kind: MediaKind,
    pub filename: String,
    pub content_type: String,
    pub data: Bytes,
}

impl MediaInput {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: Bytes,
    ) -> Result<Self, MediaError> {
        let content_type = content_type.into();
        let kind = MediaKind::from_mime(&content_type)
            .ok_or_else(|| MediaError::InvalidMediaType(content_type.clone()))?;

        Ok(Self {
            kind,
            filename: sanitize_filename(&filename.into(), kind),
            content_type,
            data,
        })
    }

    pub fn is_video(&self) -> bool {
        self.kind.is_video()
    }
}

/// Keeps only the final path component so uploads cannot escape the scratch directory.
fn sanitize_filename(raw: &str, kind: MediaKind) -> String {
    let name = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim()
        .trim_start_matches('.');

    if name.is_empty() {
        format!("upload.{}", default_extension(kind))
    } else {
        name.to_string()
    }
}

fn default_extension(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "jpg",
        MediaKind::Video => "mp4",
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MediaError {
    #[error("Invalid file type {0}. Only images and videos are supported.")]
    InvalidMediaType(String),
}
