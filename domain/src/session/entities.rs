//! Session domain entities

use super::id::SessionId;
use super::title::{DEFAULT_TITLE, derive_title};
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Speaker of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A message in a conversation (Entity)
///
/// Turns are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Represents one chat session (Entity)
///
/// A session owns its turns exclusively. Turns are only ever appended;
/// an assistant turn requires an unanswered user turn before it.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    title: String,
    turns: Vec<Turn>,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            title: DEFAULT_TITLE.to_string(),
            turns: Vec::new(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// True when the last turn is a user turn with no reply yet.
    pub fn awaiting_reply(&self) -> bool {
        matches!(self.turns.last(), Some(turn) if turn.role == Role::User)
    }

    /// Set the title from the first user prompt.
    ///
    /// No-op once the session holds any turn.
    pub fn rename_on_first_turn(&mut self, prompt: &str) {
        if self.turns.is_empty() {
            self.title = derive_title(prompt);
        }
    }

    pub fn add_user_turn(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::user(content));
    }

    pub fn add_assistant_turn(&mut self, content: impl Into<String>) -> Result<(), DomainError> {
        if !self.awaiting_reply() {
            return Err(DomainError::TurnOrder(format!(
                "session {} has no unanswered user turn",
                self.id
            )));
        }
        self.turns.push(Turn::assistant(content));
        Ok(())
    }
}
