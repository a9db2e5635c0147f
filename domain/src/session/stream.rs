//! Streaming events for model replies.
//!
//! [`StreamEvent`] represents individual events in a streaming model
//! response, enabling real-time display of output as it is generated.

/// An event in a streaming model response.
///
/// Bridges infrastructure-level streaming (SSE chunks from the provider) to
/// the application layer. A stream is finite and one-shot: it ends with
/// exactly one terminal event, or with the channel closing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A text chunk from the model. May be empty.
    Delta(String),
    /// The complete response text (signals stream end).
    Completed(String),
    /// An error that occurred during streaming.
    Error(String),
}

impl StreamEvent {
    /// Returns the text content if this is a Delta or Completed event.
    pub fn text(&self) -> Option<&str> {
        match self {
            StreamEvent::Delta(s) | StreamEvent::Completed(s) => Some(s),
            StreamEvent::Error(_) => None,
        }
    }

    /// Returns true if this event signals the end of the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Completed(_) | StreamEvent::Error(_))
    }
}
