//! Domain layer for solochat
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! A [`Session`] is one independent conversation thread: an opaque
//! [`SessionId`], a title derived from the first user message, and an
//! ordered list of [`Turn`]s.
//!
//! ## Session Store
//!
//! The [`SessionStore`] holds every session of the running UI together with
//! the single *active* pointer. Nothing is persisted; the store lives as long
//! as the process does.

pub mod config;
pub mod core;
pub mod session;

// Re-export commonly used types
pub use config::validation::{ConfigIssue, ConfigIssueCode, Severity};
pub use crate::core::{error::DomainError, model::Model};
pub use session::{
    entities::{Role, Session, Turn},
    id::SessionId,
    store::{SessionStore, SidebarEntry},
    stream::StreamEvent,
    title::{DEFAULT_TITLE, derive_title, sidebar_label},
};
