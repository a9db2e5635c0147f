//! Chat session domain.
//!
//! - [`entities::Session`]: one conversation thread with its turns
//! - [`entities::Turn`]: a single message within a session
//! - [`store::SessionStore`]: every session of the UI plus the active pointer
//! - [`stream::StreamEvent`]: events of a streaming model reply

pub mod entities;
pub mod id;
pub mod store;
pub mod stream;
pub mod title;
