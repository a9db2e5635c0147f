//! Application layer for solochat
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ChatConfig, Credential};
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, GatewayFactory, LlmGateway, LlmSession, StreamHandle},
    progress::{ConversationProgress, NoProgress},
};
pub use use_cases::chat_controller::{ChatCommand, ChatController, ChatError, ChatOutcome};
pub use use_cases::drive_conversation::{ConversationDriver, DriveError, DriveInput};
