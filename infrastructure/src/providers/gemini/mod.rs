//! Google Generative Language (Gemini / Gemma) provider
//!
//! Streams replies over `streamGenerateContent` with server-sent events.

mod factory;
mod gateway;
mod session;
mod sse;
mod types;

pub use factory::GeminiGatewayFactory;
pub use gateway::GeminiGateway;
pub use session::GeminiSession;
