//! Application-level configuration.
//!
//! - [`ChatConfig`]: which model a conversation is sent to
//! - [`Credential`]: the API key that enables the submit path

pub mod chat_config;
pub mod credential;

pub use chat_config::ChatConfig;
pub use credential::Credential;
