use std::io::Cursor;

use image::{DynamicImage, ImageFormat};

use crate::application::ports::FrameDecodeError;

/// JPEG quality used when re-encoding non-JPEG stills.
pub(super) const JPEG_QUALITY: u8 = 85;

pub(super) fn to_jpeg(data: &[u8]) -> Result<Vec<u8>, FrameDecodeError> {
    let format = image::guess_format(data)
        .map_err(|e| FrameDecodeError::UnsupportedMedia(format!("unrecognised image: {e}")))?;

    if format == ImageFormat::Jpeg {
        image::load_from_memory_with_format(data, format)
            .map_err(|e| FrameDecodeError::UnsupportedMedia(format!("corrupt JPEG: {e}")))?;
        return Ok(data.to_vec());
    }

    let decoded = image::load_from_memory_with_format(data, format).map_err(|e| {
        FrameDecodeError::UnsupportedMedia(format!("{format:?} decode failed: {e}"))
    })?;

    let mut jpeg = Vec::new();
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(Cursor::new(&mut jpeg), JPEG_QUALITY);
    DynamicImage::ImageRgb8(decoded.to_rgb8())
        .write_with_encoder(encoder)
        .map_err(|e| FrameDecodeError::UnsupportedMedia(format!("JPEG encode failed: {e}")))?;

    Ok(jpeg)
}
