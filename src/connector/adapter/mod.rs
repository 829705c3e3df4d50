pub mod http;
pub mod mistral_client;
mod mock_provider;
pub mod openai_client;

pub use http::{app, serve, AppState, ChatRequest, ChatResponse, ErrorResponse};
pub use mistral_client::MistralProvider;
pub use mock_provider::*;
pub use openai_client::OpenAiProvider;
