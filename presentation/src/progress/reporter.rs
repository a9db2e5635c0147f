//! Live rendering of a streamed reply
//!
//! A spinner runs until the first chunk arrives. Chunks are then printed as
//! they come, followed by a block cursor that is erased when the stream ends.
//! The cursor is only drawn when stdout is a terminal, so piped output holds
//! the reply text alone.

use crate::output::console::ConsoleFormatter;
use indicatif::{ProgressBar, ProgressStyle};
use solochat_application::ConversationProgress;
use solochat_domain::Role;
use std::io::{self, IsTerminal, Write};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Trailing cursor shown while a reply is streaming.
pub const STREAM_CURSOR: char = '▌';

/// Moves back over the cursor cell.
const BACKSPACE: char = '\u{8}';

#[derive(Default)]
struct StreamState {
    spinner: Option<ProgressBar>,
    cursor_shown: bool,
}

/// Prints a streaming reply to stdout
pub struct StreamingReporter {
    show_spinner: bool,
    show_cursor: bool,
    state: Mutex<StreamState>,
}

impl StreamingReporter {
    pub fn new(show_spinner: bool) -> Self {
        Self::with_cursor(show_spinner, io::stdout().is_terminal())
    }

    pub fn with_cursor(show_spinner: bool, show_cursor: bool) -> Self {
        Self {
            show_spinner,
            show_cursor,
            state: Mutex::new(StreamState::default()),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn state(&self) -> MutexGuard<'_, StreamState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn stop_spinner(state: &mut StreamState) {
        if let Some(spinner) = state.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    /// Text that replaces the cursor (if shown) with `chunk` plus a new cursor.
    fn chunk_frame(chunk: &str, cursor_shown: bool) -> String {
        let mut frame = String::with_capacity(chunk.len() + 4);
        if cursor_shown {
            frame.push(BACKSPACE);
        }
        frame.push_str(chunk);
        frame.push(STREAM_CURSOR);
        frame
    }

    /// Text that erases the cursor and ends the line.
    fn closing_frame(cursor_shown: bool) -> String {
        if cursor_shown {
            format!("{BACKSPACE} {BACKSPACE}\n")
        } else {
            "\n".to_string()
        }
    }

    fn write(text: &str) {
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }
}

impl Default for StreamingReporter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ConversationProgress for StreamingReporter {
    fn on_stream_start(&self, model: &str) {
        let mut state = self.state();
        state.cursor_shown = false;
        Self::write(&format!("{}\n", ConsoleFormatter::speaker(Role::Assistant)));

        if self.show_spinner {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(Self::spinner_style());
            spinner.set_message(format!("Thinking.. ({})", model));
            spinner.enable_steady_tick(Duration::from_millis(100));
            state.spinner = Some(spinner);
        }
    }

    fn on_chunk(&self, chunk: &str, _buffer: &str) {
        let mut state = self.state();
        Self::stop_spinner(&mut state);
        if self.show_cursor {
            Self::write(&Self::chunk_frame(chunk, state.cursor_shown));
            state.cursor_shown = true;
        } else {
            Self::write(chunk);
        }
    }

    fn on_stream_end(&self, _full_text: &str) {
        let mut state = self.state();
        Self::stop_spinner(&mut state);
        Self::write(&Self::closing_frame(state.cursor_shown));
        state.cursor_shown = false;
    }

    fn on_stream_error(&self, _error: &str, partial: &str) {
        let mut state = self.state();
        Self::stop_spinner(&mut state);
        Self::write(&Self::closing_frame(state.cursor_shown));
        state.cursor_shown = false;
        if !partial.is_empty() {
            Self::write(&format!(
                "{}\n",
                ConsoleFormatter::notice("(the partial reply above was discarded)")
            ));
        }
    }
}
