//! Gemini streaming chat session
//!
//! The API is stateless: every request carries the full history. A session
//! holds the turns it was seeded with and answers one prompt at a time.

use super::sse::SseDecoder;
use super::types::{self, GenerateContentRequest, GenerateContentResponse};
use async_trait::async_trait;
use futures::StreamExt;
use solochat_application::{GatewayError, LlmSession, StreamHandle};
use solochat_domain::{Model, StreamEvent, Turn};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Events buffered between the HTTP reader task and the consumer.
const STREAM_BUFFER: usize = 64;

pub struct GeminiSession {
    client: reqwest::Client,
    stream_url: String,
    model: Model,
    history: Vec<Turn>,
}

impl GeminiSession {
    pub fn new(client: reqwest::Client, stream_url: String, model: Model, history: Vec<Turn>) -> Self {
        Self {
            client,
            stream_url,
            model,
            history,
        }
    }

    async fn open(&self, content: &str) -> Result<reqwest::Response, GatewayError> {
        let request = GenerateContentRequest {
            contents: types::build_contents(&self.history, content),
        };

        debug!(
            model = %self.model,
            contents = request.contents.len(),
            "Opening Gemini stream"
        );

        let response = self
            .client
            .post(&self.stream_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), model = %self.model, "Gemini request rejected");
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message: types::error_message(&body),
            });
        }

        Ok(response)
    }
}

/// Interpret one `data:` payload as chunk text, or a stream failure.
fn chunk_text(payload: &str) -> Result<String, String> {
    let chunk: GenerateContentResponse = serde_json::from_str(payload)
        .map_err(|e| format!("Malformed stream chunk: {}", e))?;

    if let Some(error) = &chunk.error {
        return Err(error.describe());
    }
    if let Some(reason) = chunk.block_reason() {
        return Err(format!("Response blocked ({})", reason));
    }
    Ok(chunk.text())
}

/// Forward one payload; `false` once the stream must stop.
async fn forward_payload(
    tx: &mpsc::Sender<StreamEvent>,
    payload: &str,
    full_text: &mut String,
) -> bool {
    match chunk_text(payload) {
        Ok(text) if text.is_empty() => true,
        Ok(text) => {
            full_text.push_str(&text);
            if tx.send(StreamEvent::Delta(text)).await.is_err() {
                debug!("Stream consumer dropped");
                return false;
            }
            true
        }
        Err(message) => {
            warn!("Gemini stream error: {}", message);
            let _ = tx.send(StreamEvent::Error(message)).await;
            false
        }
    }
}

/// Read the SSE body and forward it as [`StreamEvent`]s.
///
/// Ends with exactly one terminal event unless the consumer goes away.
async fn forward_stream(response: reqwest::Response, tx: mpsc::Sender<StreamEvent>) {
    let mut body = response.bytes_stream();
    let mut decoder = SseDecoder::new();
    let mut full_text = String::new();

    while let Some(next) = body.next().await {
        let bytes = match next {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Gemini stream interrupted: {}", e);
                let _ = tx
                    .send(StreamEvent::Error(format!("Stream read error: {}", e)))
                    .await;
                return;
            }
        };
        for payload in decoder.push(&bytes) {
            if !forward_payload(&tx, &payload, &mut full_text).await {
                return;
            }
        }
    }

    if let Some(payload) = decoder.finish()
        && !forward_payload(&tx, &payload, &mut full_text).await
    {
        return;
    }

    let _ = tx.send(StreamEvent::Completed(full_text)).await;
}

#[async_trait]
impl LlmSession for GeminiSession {
    fn model(&self) -> &Model {
        &self.model
    }

    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        self.send_streaming(content).await?.collect_text().await
    }

    async fn send_streaming(&self, content: &str) -> Result<StreamHandle, GatewayError> {
        let response = self.open(content).await?;
        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        tokio::spawn(forward_stream(response, tx));
        Ok(StreamHandle::new(rx))
    }
}
