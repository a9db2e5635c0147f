//! Progress notification port
//!
//! Defines the interface for reporting a streaming reply while it arrives.

/// Callback for streaming updates during a submission
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, test recorder, etc.)
pub trait ConversationProgress: Send + Sync {
    /// Called once the request is sent, before any chunk arrives.
    fn on_stream_start(&self, _model: &str) {}

    /// Called for each non-empty text chunk, with the text accumulated so far.
    fn on_chunk(&self, _chunk: &str, _buffer: &str) {}

    /// Called when the stream finished successfully with the final text.
    fn on_stream_end(&self, _full_text: &str) {}

    /// Called when the stream failed; `partial` is the text shown so far.
    fn on_stream_error(&self, _error: &str, _partial: &str) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ConversationProgress for NoProgress {}
