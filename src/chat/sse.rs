//! Minimal incremental Server-Sent Events decoder.
//!
//! The Gemini streaming endpoint (`alt=sse`) delivers one JSON document
//! per `data:` event. Only `data` fields matter here; comments and other
//! fields are skipped. Multi-line `data:` values are joined with `\n`.

/// Incremental decoder: feed raw body chunks, collect completed `data`
/// payloads as they become whole events.
///
/// Lines are buffered as raw bytes and decoded only once complete, so a
/// multi-byte UTF-8 character split across two chunks survives intact.
#[derive(Debug, Default)]
pub struct SseDecoder {
    line_buffer: Vec<u8>,
    data_lines: Vec<String>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a chunk of bytes, returning the data payloads of any events
    /// completed by this chunk, in arrival order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut payloads = Vec::new();

        for &byte in chunk {
            if byte == b'\n' {
                let line = std::mem::take(&mut self.line_buffer);
                let line = String::from_utf8_lossy(&line);
                let line = line.strip_suffix('\r').unwrap_or(&line);
                if let Some(payload) = self.take_line(line) {
                    payloads.push(payload);
                }
            } else {
                self.line_buffer.push(byte);
            }
        }

        payloads
    }

    /// Flush any event still buffered when the stream ends.
    pub fn finish(&mut self) -> Option<String> {
        if !self.line_buffer.is_empty() {
            let line = std::mem::take(&mut self.line_buffer);
            let line = String::from_utf8_lossy(&line);
            let line = line.strip_suffix('\r').unwrap_or(&line);
            self.take_line(line);
        }

        if self.data_lines.is_empty() {
            None
        } else {
            Some(self.data_lines.drain(..).collect::<Vec<_>>().join("\n"))
        }
    }

    fn take_line(&mut self, line: &str) -> Option<String> {
        // Blank line terminates the pending event
        if line.is_empty() {
            if self.data_lines.is_empty() {
                return None;
            }
            return Some(self.data_lines.drain(..).collect::<Vec<_>>().join("\n"));
        }

        // Comment line
        if line.starts_with(':') {
            return None;
        }

        if let Some(value) = line.strip_prefix("data:") {
            self.data_lines
                .push(value.strip_prefix(' ').unwrap_or(value).to_string());
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_event() {
        let mut decoder = SseDecoder::new();
        let payloads = decoder.push(b"data: hello\n\n");
        assert_eq!(payloads, vec!["hello"]);
    }

    #[test]
    fn test_event_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: hel").is_empty());
        assert_eq!(decoder.push(b"lo\n\n"), vec!["hello"]);
    }

    #[test]
    fn test_multibyte_char_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        // "café": the é (0xC3 0xA9) straddles the chunk boundary
        assert!(decoder.push(b"data: caf\xC3").is_empty());
        assert_eq!(decoder.push(b"\xA9\n\n"), vec!["caf\u{e9}"]);
    }

    #[test]
    fn test_multiple_events_keep_order() {
        let mut decoder = SseDecoder::new();
        let payloads = decoder.push(b"data: first\n\ndata: second\n\n");
        assert_eq!(payloads, vec!["first", "second"]);
    }

    #[test]
    fn test_multi_line_data_joined() {
        let mut decoder = SseDecoder::new();
        let payloads = decoder.push(b"data: line1\ndata: line2\n\n");
        assert_eq!(payloads, vec!["line1\nline2"]);
    }

    #[test]
    fn test_comments_and_other_fields_skipped() {
        let mut decoder = SseDecoder::new();
        let payloads = decoder.push(b": keepalive\nevent: message\ndata: hi\n\n");
        assert_eq!(payloads, vec!["hi"]);
    }

    #[test]
    fn test_crlf_lines() {
        let mut decoder = SseDecoder::new();
        let payloads = decoder.push(b"data: hi\r\n\r\n");
        assert_eq!(payloads, vec!["hi"]);
    }

    #[test]
    fn test_no_space_after_colon() {
        let mut decoder = SseDecoder::new();
        let payloads = decoder.push(b"data:hi\n\n");
        assert_eq!(payloads, vec!["hi"]);
    }

    #[test]
    fn test_finish_flushes_trailing_event() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push(b"data: trailing").is_empty());
        assert_eq!(decoder.finish().as_deref(), Some("trailing"));
    }

    #[test]
    fn test_finish_empty() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.finish().is_none());
    }
}
