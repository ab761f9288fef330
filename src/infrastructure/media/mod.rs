mod ffmpeg_frame_decoder;
mod jpeg_transcoder;

pub use ffmpeg_frame_decoder::FfmpegFrameDecoder;
