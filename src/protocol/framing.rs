// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Frame extraction from the incoming byte stream.
//!
//! The board terminates every response with the literal byte `'}'`;
//! there is no length prefix. Carriage returns and horizontal tabs may
//! appear anywhere in the stream and carry no meaning.

/// Maximum number of bytes buffered while waiting for a terminator.
/// A peer that never sends `'}'` would otherwise grow the buffer
/// without bound; anything this large cannot be a valid status frame.
const MAX_PENDING: usize = 8 * 1024;

/// Accumulates raw bytes and emits complete frames.
///
/// Rules: `'\r'` and `'\t'` are dropped; every other byte is buffered;
/// on `'}'` the buffer (terminator included, surrounding whitespace
/// trimmed) is emitted as one frame and the buffer resets.
///
/// # Examples
///
/// ```
/// use v6m_lib::FrameExtractor;
///
/// let mut extractor = FrameExtractor::new();
/// let frames = extractor.extend(b"{\"a\":1}\r{\"b\":2}");
/// assert_eq!(frames, vec!["{\"a\":1}".to_string(), "{\"b\":2}".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct FrameExtractor {
    buf: Vec<u8>,
}

impl FrameExtractor {
    /// Creates an extractor with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one byte, returning a complete frame if this byte
    /// terminated one.
    pub fn push(&mut self, byte: u8) -> Option<String> {
        match byte {
            b'\r' | b'\t' => None,
            b'}' => {
                self.buf.push(byte);
                let frame = String::from_utf8_lossy(&self.buf).trim().to_string();
                self.buf.clear();
                Some(frame)
            }
            _ => {
                if self.buf.len() >= MAX_PENDING {
                    tracing::warn!(
                        pending = self.buf.len(),
                        "discarding oversized unterminated frame buffer"
                    );
                    self.buf.clear();
                }
                self.buf.push(byte);
                None
            }
        }
    }

    /// Feeds a chunk of bytes, returning every frame completed by it.
    pub fn extend(&mut self, bytes: &[u8]) -> Vec<String> {
        bytes.iter().filter_map(|&byte| self.push(byte)).collect()
    }

    /// Returns the number of buffered bytes awaiting a terminator.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    /// Discards any partially accumulated frame.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_frame_on_terminator() {
        let mut extractor = FrameExtractor::new();
        assert_eq!(extractor.push(b'{'), None);
        assert_eq!(extractor.push(b'a'), None);
        assert_eq!(extractor.push(b'}'), Some("{a}".to_string()));
        assert_eq!(extractor.pending(), 0);
    }

    #[test]
    fn splits_exactly_at_each_terminator() {
        let mut extractor = FrameExtractor::new();
        let frames = extractor.extend(b"{\"a\":1}\r{\"b\":2}\t}");
        assert_eq!(
            frames,
            vec!["{\"a\":1}".to_string(), "{\"b\":2}".to_string(), "}".to_string()]
        );
    }

    #[test]
    fn drops_carriage_returns_and_tabs() {
        let mut extractor = FrameExtractor::new();
        let frames = extractor.extend(b"{\"x\"\r:\t\"y\"}");
        assert_eq!(frames, vec!["{\"x\":\"y\"}".to_string()]);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let mut extractor = FrameExtractor::new();
        let frames = extractor.extend(b"  \n{\"a\":1}");
        assert_eq!(frames, vec!["{\"a\":1}".to_string()]);
    }

    #[test]
    fn keeps_partial_frame_across_chunks() {
        let mut extractor = FrameExtractor::new();
        assert!(extractor.extend(b"{\"out").is_empty());
        assert_eq!(extractor.pending(), 5);
        let frames = extractor.extend(b"put\":1}");
        assert_eq!(frames, vec!["{\"output\":1}".to_string()]);
    }

    #[test]
    fn discards_oversized_buffer() {
        let mut extractor = FrameExtractor::new();
        let garbage = vec![b'a'; MAX_PENDING + 100];
        assert!(extractor.extend(&garbage).is_empty());
        assert!(extractor.pending() <= MAX_PENDING);

        // The extractor keeps working after the discard.
        extractor.clear();
        let frames = extractor.extend(b"{\"a\":1}");
        assert_eq!(frames, vec!["{\"a\":1}".to_string()]);
    }

    #[test]
    fn clear_resets_partial_frame() {
        let mut extractor = FrameExtractor::new();
        extractor.extend(b"{\"half");
        extractor.clear();
        assert_eq!(extractor.pending(), 0);
        let frames = extractor.extend(b"{\"a\":1}");
        assert_eq!(frames, vec!["{\"a\":1}".to_string()]);
    }

    #[test]
    fn non_utf8_bytes_are_replaced_lossily() {
        let mut extractor = FrameExtractor::new();
        let frames = extractor.extend(&[b'{', 0xFF, b'}']);
        assert_eq!(frames.len(), 1);
        assert!(frames[0].starts_with('{'));
        assert!(frames[0].ends_with('}'));
    }
}
