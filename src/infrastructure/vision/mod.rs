mod anthropic_vision_backend;
mod astica_backend;
mod backend_factory;
mod google_vision_backend;
mod openai_vision_backend;
mod prompt;
mod rekognition_backend;

pub use anthropic_vision_backend::AnthropicVisionBackend;
pub use astica_backend::{AsticaBackend, AsticaResponse};
pub use backend_factory::BackendFactory;
pub use google_vision_backend::{AnnotateImageResponse, GoogleVisionBackend};
pub use openai_vision_backend::OpenAiVisionBackend;
pub use prompt::frame_prompt;
pub use rekognition_backend::{RekognitionBackend, RekognitionConfig};
