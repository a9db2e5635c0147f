//! Session identifier value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a chat session (Value Object)
///
/// Freshly generated ids are UUID v4 strings; any string is accepted when
/// parsing user input so that lookups of unknown ids fail in the store rather
/// than at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a new random id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, enough to tell sessions apart on screen.
    pub fn short(&self) -> &str {
        crate::core::string::take_chars(&self.0, 8)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
