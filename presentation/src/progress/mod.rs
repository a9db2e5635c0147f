//! Live display of streamed replies

pub mod reporter;
