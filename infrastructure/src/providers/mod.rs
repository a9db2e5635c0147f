//! LLM provider adapters
//!
//! Each provider implements the `GatewayFactory` / `LlmGateway` /
//! `LlmSession` ports from the application layer.

pub mod gemini;
