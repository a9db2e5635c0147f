//! Gemini implementation of the `LlmGateway` port

use super::session::GeminiSession;
use async_trait::async_trait;
use solochat_application::{GatewayError, LlmGateway, LlmSession};
use solochat_domain::{Model, Turn};

pub struct GeminiGateway {
    client: reqwest::Client,
    base_url: String,
}

impl GeminiGateway {
    /// `client` must already carry the API key header.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn stream_url(&self, model: &Model) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url.trim_end_matches('/'),
            model.as_str()
        )
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn create_session(
        &self,
        model: &Model,
        history: &[Turn],
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(GeminiSession::new(
            self.client.clone(),
            self.stream_url(model),
            model.clone(),
            history.to_vec(),
        )))
    }
}
