//! Drive Conversation use case.
//!
//! Turns one submitted user message into the final assistant text:
//!
//! 1. Open a gateway session seeded with the prior turns of the same chat
//! 2. Send the new message with [`send_streaming()`](LlmSession::send_streaming)
//! 3. Append every non-empty chunk to a running buffer, reporting each one
//! 4. Return the buffer once the stream ends
//!
//! Any failure is terminal: there is no retry, and text already received is
//! handed back inside [`DriveError::Stream`] instead of being persisted.

use crate::ports::llm_gateway::{GatewayError, LlmGateway, LlmSession};
use crate::ports::progress::ConversationProgress;
use solochat_domain::core::string::truncate;
use solochat_domain::{Model, StreamEvent, Turn};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while driving a reply.
#[derive(Error, Debug)]
pub enum DriveError {
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Stream failed: {message}")]
    Stream {
        message: String,
        /// Text received before the failure; discarded by the caller.
        partial: String,
    },
}

impl DriveError {
    /// Text that had already been streamed when the failure happened.
    pub fn partial(&self) -> &str {
        match self {
            DriveError::Stream { partial, .. } => partial,
            DriveError::Gateway(_) => "",
        }
    }
}

/// Input for the [`ConversationDriver`].
#[derive(Debug, Clone)]
pub struct DriveInput {
    /// Prior turns of the session, excluding the message being sent.
    pub history: Vec<Turn>,
    /// The new user message.
    pub prompt: String,
    pub model: Model,
}

impl DriveInput {
    pub fn new(history: Vec<Turn>, prompt: impl Into<String>, model: Model) -> Self {
        Self {
            history,
            prompt: prompt.into(),
            model,
        }
    }
}

/// Streams one reply from the model.
#[derive(Clone)]
pub struct ConversationDriver {
    gateway: Arc<dyn LlmGateway>,
}

impl ConversationDriver {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self { gateway }
    }

    /// Execute one submission, reporting chunks as they arrive.
    pub async fn execute(
        &self,
        input: DriveInput,
        progress: &dyn ConversationProgress,
    ) -> Result<String, DriveError> {
        info!(
            model = %input.model,
            history = input.history.len(),
            "Sending message: {}",
            truncate(&input.prompt, 100)
        );

        let session = self
            .gateway
            .create_session(&input.model, &input.history)
            .await?;

        progress.on_stream_start(input.model.as_str());
        match Self::stream_reply(session.as_ref(), &input.prompt, progress).await {
            Ok(text) => {
                debug!(bytes = text.len(), "Stream completed");
                progress.on_stream_end(&text);
                Ok(text)
            }
            Err(e) => {
                warn!("Stream aborted: {}", e);
                progress.on_stream_error(&e.to_string(), e.partial());
                Err(e)
            }
        }
    }

    async fn stream_reply(
        session: &dyn LlmSession,
        prompt: &str,
        progress: &dyn ConversationProgress,
    ) -> Result<String, DriveError> {
        let mut handle = session.send_streaming(prompt).await?;
        let mut buffer = String::new();

        while let Some(event) = handle.next().await {
            match event {
                StreamEvent::Delta(chunk) => {
                    if chunk.is_empty() {
                        continue;
                    }
                    buffer.push_str(&chunk);
                    progress.on_chunk(&chunk, &buffer);
                }
                StreamEvent::Completed(text) => {
                    // Non-streaming sessions deliver the whole reply here
                    if buffer.is_empty() && !text.is_empty() {
                        buffer = text;
                        progress.on_chunk(&buffer, &buffer);
                    }
                    break;
                }
                StreamEvent::Error(message) => {
                    return Err(DriveError::Stream {
                        message,
                        partial: buffer,
                    });
                }
            }
        }

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::StreamHandle;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // === Mock implementations ===

    /// Gateway whose sessions replay a scripted event list.
    struct ScriptedGateway {
        events: Vec<StreamEvent>,
        seen_history: Mutex<Vec<Turn>>,
    }

    impl ScriptedGateway {
        fn new(events: Vec<StreamEvent>) -> Arc<Self> {
            Arc::new(Self {
                events,
                seen_history: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LlmGateway for ScriptedGateway {
        async fn create_session(
            &self,
            model: &Model,
            history: &[Turn],
        ) -> Result<Box<dyn LlmSession>, GatewayError> {
            *self.seen_history.lock().unwrap() = history.to_vec();
            Ok(Box::new(ScriptedSession {
                model: model.clone(),
                events: self.events.clone(),
            }))
        }
    }

    struct ScriptedSession {
        model: Model,
        events: Vec<StreamEvent>,
    }

    #[async_trait]
    impl LlmSession for ScriptedSession {
        fn model(&self) -> &Model {
            &self.model
        }

        async fn send(&self, _content: &str) -> Result<String, GatewayError> {
            unreachable!("driver always streams")
        }

        async fn send_streaming(&self, _content: &str) -> Result<StreamHandle, GatewayError> {
            Ok(StreamHandle::from_events(self.events.clone()))
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        chunks: Mutex<Vec<String>>,
        ended: Mutex<Option<String>>,
        error: Mutex<Option<(String, String)>>,
    }

    impl ConversationProgress for RecordingProgress {
        fn on_chunk(&self, chunk: &str, _buffer: &str) {
            self.chunks.lock().unwrap().push(chunk.to_string());
        }

        fn on_stream_end(&self, full_text: &str) {
            *self.ended.lock().unwrap() = Some(full_text.to_string());
        }

        fn on_stream_error(&self, error: &str, partial: &str) {
            *self.error.lock().unwrap() = Some((error.to_string(), partial.to_string()));
        }
    }

    fn delta(s: &str) -> StreamEvent {
        StreamEvent::Delta(s.to_string())
    }

    fn input() -> DriveInput {
        DriveInput::new(
            vec![Turn::user("earlier"), Turn::assistant("reply")],
            "Hello",
            Model::default(),
        )
    }

    #[tokio::test]
    async fn concatenates_non_empty_chunks_in_order() {
        let gateway = ScriptedGateway::new(vec![
            delta("Hi"),
            delta(""),
            delta(" there"),
            delta("!"),
            StreamEvent::Completed(String::new()),
        ]);
        let driver = ConversationDriver::new(gateway.clone());
        let progress = RecordingProgress::default();

        let text = driver.execute(input(), &progress).await.unwrap();

        assert_eq!(text, "Hi there!");
        assert_eq!(*progress.chunks.lock().unwrap(), vec!["Hi", " there", "!"]);
        assert_eq!(progress.ended.lock().unwrap().as_deref(), Some("Hi there!"));
        assert_eq!(
            *gateway.seen_history.lock().unwrap(),
            vec![Turn::user("earlier"), Turn::assistant("reply")]
        );
    }

    #[tokio::test]
    async fn empty_stream_yields_empty_text() {
        let driver = ConversationDriver::new(ScriptedGateway::new(vec![]));
        let text = driver.execute(input(), &crate::NoProgress).await.unwrap();
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn completed_text_used_when_no_deltas() {
        let driver = ConversationDriver::new(ScriptedGateway::new(vec![StreamEvent::Completed(
            "whole reply".to_string(),
        )]));
        let text = driver.execute(input(), &crate::NoProgress).await.unwrap();
        assert_eq!(text, "whole reply");
    }

    #[tokio::test]
    async fn error_after_two_chunks_returns_partial() {
        let driver = ConversationDriver::new(ScriptedGateway::new(vec![
            delta("one "),
            delta("two"),
            StreamEvent::Error("connection reset".to_string()),
        ]));
        let progress = RecordingProgress::default();

        let err = driver.execute(input(), &progress).await.unwrap_err();

        assert!(matches!(err, DriveError::Stream { .. }));
        assert_eq!(err.partial(), "one two");
        assert!(progress.ended.lock().unwrap().is_none());
        let (message, partial) = progress.error.lock().unwrap().clone().unwrap();
        assert!(message.contains("connection reset"));
        assert_eq!(partial, "one two");
    }
}
