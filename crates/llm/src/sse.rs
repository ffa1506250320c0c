//! Incremental Server-Sent Events decoder.

/// Splits a byte stream into SSE `data:` payloads.
///
/// Network chunks rarely align with event boundaries, so bytes are held
/// until a full line arrives. Comments, `event:`/`id:` fields and blank
/// lines are skipped. The `[DONE]` sentinel ends the stream; anything fed
/// after it is ignored.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    done: bool,
}

impl SseDecoder {
    /// Create an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes and return the payloads of every completed line.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        if self.done {
            return Vec::new();
        }
        self.buffer.extend_from_slice(bytes);

        let mut payloads = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches(['\n', '\r']);

            let Some(data) = line.strip_prefix("data:") else {
                continue;
            };
            let data = data.trim_start();
            if data == "[DONE]" {
                self.done = true;
                self.buffer.clear();
                break;
            }
            if !data.is_empty() {
                payloads.push(data.to_owned());
            }
        }
        payloads
    }

    /// Whether the `[DONE]` sentinel has been seen.
    pub fn is_done(&self) -> bool {
        self.done
    }
}
