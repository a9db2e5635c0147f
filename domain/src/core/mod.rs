//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: hosted models a conversation can be sent to
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: character-safe truncation helpers

pub mod error;
pub mod model;
pub mod string;
