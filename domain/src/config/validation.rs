//! Structured configuration issues.
//!
//! Config validation never aborts loading: it returns a list of
//! [`ConfigIssue`]s that the binary reports before starting the REPL.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The affected feature cannot work at all (e.g. every request fails).
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A required string field is blank.
    EmptyValue { field: String },
    /// A numeric field is outside its usable range.
    OutOfRange { field: String, value: u64 },
    /// A field is set but its value cannot be used.
    InvalidValue { field: String },
}

/// A detected issue in the loaded configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn empty_value(severity: Severity, field: &str) -> Self {
        Self {
            severity,
            code: ConfigIssueCode::EmptyValue {
                field: field.to_string(),
            },
            message: format!("{}: value must not be empty", field),
        }
    }

    pub fn out_of_range(severity: Severity, field: &str, value: u64, expected: &str) -> Self {
        Self {
            severity,
            code: ConfigIssueCode::OutOfRange {
                field: field.to_string(),
                value,
            },
            message: format!("{}: {} is out of range ({})", field, value, expected),
        }
    }

    pub fn invalid_value(severity: Severity, field: &str, reason: &str) -> Self {
        Self {
            severity,
            code: ConfigIssueCode::InvalidValue {
                field: field.to_string(),
            },
            message: format!("{}: {}", field, reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_message_names_field() {
        let issue = ConfigIssue::empty_value(Severity::Error, "model.name");
        assert_eq!(issue.message, "model.name: value must not be empty");
        assert_eq!(
            issue.code,
            ConfigIssueCode::EmptyValue {
                field: "model.name".to_string()
            }
        );
    }

    #[test]
    fn out_of_range_message_includes_value() {
        let issue = ConfigIssue::out_of_range(
            Severity::Warning,
            "providers.gemini.read_timeout_secs",
            0,
            "must be at least 1",
        );
        assert!(issue.message.contains("0 is out of range"));
        assert_eq!(issue.severity, Severity::Warning);
    }

    #[test]
    fn invalid_value_message_carries_reason() {
        let issue = ConfigIssue::invalid_value(
            Severity::Error,
            "providers.gemini.base_url",
            "relative URL without a base",
        );
        assert_eq!(
            issue.message,
            "providers.gemini.base_url: relative URL without a base"
        );
        assert_eq!(issue.severity, Severity::Error);
    }
}
