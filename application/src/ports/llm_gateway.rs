//! LLM Gateway port
//!
//! Defines the interface for communicating with the hosted model.

use crate::config::Credential;
use async_trait::async_trait;
use solochat_domain::{Model, StreamEvent, Turn};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Stream failed: {0}")]
    StreamFailed(String),
}

/// Builds a gateway from a credential.
///
/// Construction may fail (bad key format, TLS setup); callers retry on the
/// next user action.
pub trait GatewayFactory: Send + Sync {
    fn build(&self, credential: &Credential) -> Result<Arc<dyn LlmGateway>, GatewayError>;
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with the model.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Open a chat seeded with prior turns of one conversation.
    ///
    /// `history` holds the turns before the message about to be sent, in
    /// conversation order.
    async fn create_session(
        &self,
        model: &Model,
        history: &[Turn],
    ) -> Result<Box<dyn LlmSession>, GatewayError>;
}

/// Handle for receiving streaming events from an LLM session.
///
/// Wraps an `mpsc::Receiver<StreamEvent>`; the stream is finite and cannot
/// be restarted.
pub struct StreamHandle {
    pub receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Build a handle that replays a fixed list of events, then closes.
    pub fn from_events(events: Vec<StreamEvent>) -> Self {
        let (tx, rx) = mpsc::channel(events.len().max(1));
        for event in events {
            // Capacity matches the event count, so this never fails
            let _ = tx.try_send(event);
        }
        Self::new(rx)
    }

    /// Receive the next event; `None` once the producer is gone.
    pub async fn next(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }

    /// Consume the stream and collect all text into a single string.
    pub async fn collect_text(mut self) -> Result<String, GatewayError> {
        let mut full_text = String::new();
        while let Some(event) = self.receiver.recv().await {
            match event {
                StreamEvent::Delta(chunk) => full_text.push_str(&chunk),
                StreamEvent::Completed(text) => {
                    if full_text.is_empty() {
                        return Ok(text);
                    }
                    return Ok(full_text);
                }
                StreamEvent::Error(e) => {
                    return Err(GatewayError::StreamFailed(e));
                }
            }
        }
        // Channel closed without Completed; return what we have
        Ok(full_text)
    }
}

/// An active LLM session
#[async_trait]
pub trait LlmSession: Send + Sync {
    /// Get the model used by this session
    fn model(&self) -> &Model;

    /// Send a message and get a response
    async fn send(&self, content: &str) -> Result<String, GatewayError>;

    /// Send a message and get a streaming response.
    ///
    /// Default implementation calls `send()` and wraps the result in a single
    /// `Completed` event.
    async fn send_streaming(&self, content: &str) -> Result<StreamHandle, GatewayError> {
        let result = self.send(content).await?;
        Ok(StreamHandle::from_events(vec![StreamEvent::Completed(result)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoSession(Model);

    #[async_trait]
    impl LlmSession for EchoSession {
        fn model(&self) -> &Model {
            &self.0
        }

        async fn send(&self, content: &str) -> Result<String, GatewayError> {
            Ok(format!("echo: {}", content))
        }
    }

    #[tokio::test]
    async fn collect_text_concatenates_deltas() {
        let handle = StreamHandle::from_events(vec![
            StreamEvent::Delta("Hel".to_string()),
            StreamEvent::Delta("lo".to_string()),
            StreamEvent::Completed("Hello".to_string()),
        ]);
        assert_eq!(handle.collect_text().await.unwrap(), "Hello");
    }

    #[tokio::test]
    async fn collect_text_surfaces_stream_error() {
        let handle = StreamHandle::from_events(vec![
            StreamEvent::Delta("partial".to_string()),
            StreamEvent::Error("boom".to_string()),
        ]);
        let err = handle.collect_text().await.unwrap_err();
        assert!(matches!(err, GatewayError::StreamFailed(msg) if msg == "boom"));
    }

    #[tokio::test]
    async fn collect_text_without_completed_returns_buffer() {
        let handle = StreamHandle::from_events(vec![StreamEvent::Delta("abc".to_string())]);
        assert_eq!(handle.collect_text().await.unwrap(), "abc");
    }

    #[tokio::test]
    async fn default_send_streaming_wraps_send() {
        let session = EchoSession(Model::default());
        let mut handle = session.send_streaming("hi").await.unwrap();
        assert_eq!(
            handle.next().await,
            Some(StreamEvent::Completed("echo: hi".to_string()))
        );
        assert_eq!(handle.next().await, None);
    }
}
