//! Incremental decoder for `text/event-stream` bodies.
//!
//! Bytes arrive in arbitrary slices, so lines (and multi-byte characters)
//! may be split across reads. The decoder buffers raw bytes and only
//! decodes complete lines.

const DATA_FIELD: &str = "data:";

#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes; returns the `data:` payloads of every completed line.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);

        let mut payloads = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(data) = Self::data_of(&line) {
                payloads.push(data);
            }
        }
        payloads
    }

    /// Flush a trailing line that was not newline-terminated.
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        Self::data_of(&rest)
    }

    fn data_of(line: &[u8]) -> Option<String> {
        let line = String::from_utf8_lossy(line);
        let line = line.trim_end_matches(['\r', '\n']);
        let data = line.strip_prefix(DATA_FIELD)?;
        let data = data.strip_prefix(' ').unwrap_or(data);
        // Keep-alives and `[DONE]` markers carry no JSON
        if data.trim().is_empty() || data.trim() == "[DONE]" {
            return None;
        }
        Some(data.to_string())
    }
}
