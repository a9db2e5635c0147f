//! Model value object representing a hosted LLM model

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Hosted models reachable through the Generative Language API (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // Gemma models
    Gemma3_12bIt,
    Gemma3_27bIt,
    // Gemini models
    Gemini25Flash,
    Gemini25Pro,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemma3_12bIt => "gemma-3-12b-it",
            Model::Gemma3_27bIt => "gemma-3-27b-it",
            Model::Gemini25Flash => "gemini-2.5-flash",
            Model::Gemini25Pro => "gemini-2.5-pro",
            Model::Custom(s) => s,
        }
    }

    /// Parse a model name, rejecting blank input.
    pub fn parse_name(name: &str) -> Result<Model, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidModel(
                "model name must not be empty".to_string(),
            ));
        }
        Ok(name.parse().unwrap_or_else(|e: std::convert::Infallible| match e {}))
    }
}

impl Default for Model {
    /// Returns the default model (gemma-3-12b-it)
    fn default() -> Self {
        Model::Gemma3_12bIt
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "gemma-3-12b-it" => Model::Gemma3_12bIt,
            "gemma-3-27b-it" => Model::Gemma3_27bIt,
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Model::parse_name(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        for model in [
            Model::Gemma3_12bIt,
            Model::Gemma3_27bIt,
            Model::Gemini25Flash,
            Model::Gemini25Pro,
        ] {
            let parsed: Model = model.to_string().parse().unwrap();
            assert_eq!(model, parsed);
        }
    }

    #[test]
    fn test_custom_model() {
        let model: Model = "gemini-exp-1206".parse().unwrap();
        assert_eq!(model, Model::Custom("gemini-exp-1206".to_string()));
        assert_eq!(model.to_string(), "gemini-exp-1206");
    }

    #[test]
    fn test_parse_name_rejects_blank() {
        assert!(Model::parse_name("   ").is_err());
        assert_eq!(
            Model::parse_name(" gemma-3-27b-it ").unwrap(),
            Model::Gemma3_27bIt
        );
    }

    #[test]
    fn test_model_default() {
        assert_eq!(Model::default().as_str(), "gemma-3-12b-it");
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        let result: Result<Model, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
