//! Generative Language API wire types
//!
//! Request and response bodies for `streamGenerateContent`, plus the
//! conversions between [`Turn`]s and provider `contents`.

use serde::{Deserialize, Serialize};
use solochat_domain::{Role, Turn};

/// Role names used on the wire.
const USER_ROLE: &str = "user";
const MODEL_ROLE: &str = "model";

/// Longest error body carried into a [`GatewayError`](solochat_application::GatewayError).
const MAX_ERROR_CHARS: usize = 200;

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Set on reasoning parts emitted by thinking models.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub thought: bool,
}

impl Part {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            thought: false,
        }
    }
}

/// One SSE `data:` payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    pub model_version: Option<String>,
    /// Present when the server reports a failure inside the stream.
    #[serde(default)]
    pub error: Option<ApiErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl ApiErrorDetail {
    pub fn describe(&self) -> String {
        match &self.status {
            Some(status) => format!("{} ({})", self.message, status),
            None => self.message.clone(),
        }
    }
}

/// Map a conversation role to the provider's role name.
pub fn wire_role(role: Role) -> &'static str {
    match role {
        Role::User => USER_ROLE,
        Role::Assistant => MODEL_ROLE,
    }
}

/// Build request `contents` from prior turns plus the new prompt.
///
/// Consecutive entries with the same role are merged into one entry with
/// several parts, since the provider rejects non-alternating history.
pub fn build_contents(history: &[Turn], prompt: &str) -> Vec<Content> {
    let mut contents: Vec<Content> = Vec::with_capacity(history.len() + 1);

    let entries = history
        .iter()
        .map(|turn| (wire_role(turn.role), turn.content.as_str()))
        .chain(std::iter::once((USER_ROLE, prompt)));

    for (role, text) in entries {
        match contents.last_mut() {
            Some(last) if last.role == role => last.parts.push(Part::text(text)),
            _ => contents.push(Content {
                role: role.to_string(),
                parts: vec![Part::text(text)],
            }),
        }
    }

    contents
}

impl GenerateContentResponse {
    /// Visible text of this chunk: every non-thought part of the first
    /// candidate, concatenated. Missing pieces yield an empty string.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter(|p| !p.thought)
                    .filter_map(|p| p.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Reason the response was withheld, if it carries no text and was
    /// stopped by a filter.
    pub fn block_reason(&self) -> Option<String> {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
        {
            return Some(reason);
        }

        let candidate = self.candidates.first()?;
        let reason = candidate.finish_reason.as_deref()?;
        let blocked = matches!(
            reason,
            "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" | "SPII"
        );
        (blocked && self.text().is_empty()).then(|| reason.to_string())
    }
}

/// Human-readable message for a non-2xx body.
///
/// Uses the JSON error envelope when present, otherwise the raw body,
/// truncated.
pub fn error_message(body: &str) -> String {
    let message = match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.error.describe(),
        Err(_) => body.trim().to_string(),
    };
    solochat_domain::core::string::truncate(&message, MAX_ERROR_CHARS)
}
