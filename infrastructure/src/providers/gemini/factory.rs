//! Gemini gateway construction

use super::gateway::GeminiGateway;
use crate::config::FileGeminiConfig;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use solochat_application::{Credential, GatewayError, GatewayFactory, LlmGateway};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Builds [`GeminiGateway`]s for a credential.
#[derive(Debug, Clone)]
pub struct GeminiGatewayFactory {
    base_url: String,
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl GeminiGatewayFactory {
    /// `read_timeout` bounds the wait for each read, not the whole reply, so a
    /// reply may stream for as long as chunks keep arriving.
    pub fn new(base_url: impl Into<String>, connect_timeout: Duration, read_timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout,
            read_timeout,
        }
    }

    pub fn from_config(config: &FileGeminiConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.connect_timeout_secs.max(1)),
            Duration::from_secs(config.read_timeout_secs.max(1)),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// HTTP client builder with the key and timeouts applied.
    fn client_builder(&self, credential: &Credential) -> Result<reqwest::ClientBuilder, GatewayError> {
        reqwest::Url::parse(&self.base_url).map_err(|e| {
            GatewayError::ConnectionError(format!("Invalid base URL {}: {}", self.base_url, e))
        })?;

        let mut key = HeaderValue::from_str(credential.expose()).map_err(|_| {
            GatewayError::ConnectionError("API key contains invalid characters".to_string())
        })?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(self.connect_timeout)
            .read_timeout(self.read_timeout))
    }

    fn build_with(
        &self,
        builder: reqwest::ClientBuilder,
    ) -> Result<Arc<dyn LlmGateway>, GatewayError> {
        let client = builder
            .build()
            .map_err(|e| GatewayError::ConnectionError(format!("HTTP client setup failed: {}", e)))?;
        debug!(base_url = %self.base_url, "Gemini gateway ready");
        Ok(Arc::new(GeminiGateway::new(client, self.base_url.clone())))
    }
}

impl GatewayFactory for GeminiGatewayFactory {
    fn build(&self, credential: &Credential) -> Result<Arc<dyn LlmGateway>, GatewayError> {
        let builder = self.client_builder(credential)?;
        self.build_with(builder)
    }
}

#[cfg(test)]
pub(super) fn test_gateway(
    base_url: &str,
    key: &str,
) -> Result<Arc<dyn LlmGateway>, GatewayError> {
    test_gateway_with_read_timeout(base_url, key, Duration::from_secs(5))
}

#[cfg(test)]
pub(super) fn test_gateway_with_read_timeout(
    base_url: &str,
    key: &str,
    read_timeout: Duration,
) -> Result<Arc<dyn LlmGateway>, GatewayError> {
    let factory = GeminiGatewayFactory::new(base_url, Duration::from_secs(5), read_timeout);
    let credential = Credential::new(key)
        .ok_or_else(|| GatewayError::ConnectionError("empty test key".to_string()))?;
    let builder = factory.client_builder(&credential)?.no_proxy();
    factory.build_with(builder)
}
