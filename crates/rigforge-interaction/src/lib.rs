//! External collaborators: the Gemini-backed AI gateway and scanner input.

pub mod file_frame_source;
pub mod gemini_api_agent;
pub mod gemini_gateway;
pub mod image_prep;
pub mod prompts;

pub use file_frame_source::FileFrameSource;
pub use gemini_api_agent::{GeminiApiAgent, GeminiPrompt};
pub use gemini_gateway::GeminiGateway;
pub use image_prep::{ImagePrepError, prepare_frame};
