//! Bounded line buffer

use std::borrow::Cow;
use std::fmt;

use crate::{DELIMITER, MAX_LINE};

/// Fixed-capacity buffer staging one line
///
/// Holds at most `capacity - 1` payload bytes and never the delimiter. The
/// last slot is reserved, mirroring a terminated C string, so a full buffer
/// and the wire limit agree.
pub struct LineBuf {
    buf: Box<[u8]>,
    len: usize,
}

impl LineBuf {
    /// Buffer with the default `MAX_LINE` capacity
    pub fn new() -> Self {
        Self::with_capacity(MAX_LINE)
    }

    /// Buffer with a custom capacity (clamped to at least 1)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0u8; capacity.max(1)].into_boxed_slice(),
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Largest payload this buffer can hold
    pub fn max_payload(&self) -> usize {
        self.buf.len() - 1
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len >= self.max_payload()
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Append one payload byte; returns false when the buffer is full
    pub fn push(&mut self, byte: u8) -> bool {
        if self.is_full() {
            return false;
        }
        self.buf[self.len] = byte;
        self.len += 1;
        true
    }

    /// Replace the contents with `text`, cut at the first delimiter and
    /// truncated to `max_payload()` bytes. Returns the stored length.
    pub fn fill_from(&mut self, text: &[u8]) -> usize {
        let end = text
            .iter()
            .position(|&b| b == DELIMITER)
            .unwrap_or(text.len())
            .min(self.max_payload());
        self.buf[..end].copy_from_slice(&text[..end]);
        self.len = end;
        end
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Payload as text, invalid UTF-8 replaced
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }
}

impl Default for LineBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LineBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineBuf")
            .field("capacity", &self.capacity())
            .field("line", &self.to_string_lossy())
            .finish()
    }
}

/// Strip trailing `\r` / `\n` artifacts left by terminals
pub fn trim_line_end(line: &[u8]) -> &[u8] {
    let mut end = line.len();
    while end > 0 && matches!(line[end - 1], b'\n' | b'\r') {
        end -= 1;
    }
    &line[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        let buf = LineBuf::new();
        assert_eq!(buf.capacity(), MAX_LINE);
        assert_eq!(buf.max_payload(), MAX_LINE - 1);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_capacity_clamped() {
        let buf = LineBuf::with_capacity(0);
        assert_eq!(buf.capacity(), 1);
        assert_eq!(buf.max_payload(), 0);
        assert!(buf.is_full());
    }

    #[test]
    fn test_push_stops_at_max_payload() {
        let mut buf = LineBuf::with_capacity(4);
        assert!(buf.push(b'a'));
        assert!(buf.push(b'b'));
        assert!(buf.push(b'c'));
        assert!(!buf.push(b'd'));
        assert_eq!(buf.as_bytes(), b"abc");
        assert!(buf.is_full());
    }

    #[test]
    fn test_clear_resets_length() {
        let mut buf = LineBuf::with_capacity(8);
        buf.fill_from(b"hello");
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.as_bytes(), b"");
    }

    #[test]
    fn test_fill_from_truncates() {
        let mut buf = LineBuf::with_capacity(6);
        assert_eq!(buf.fill_from(b"abcdefgh"), 5);
        assert_eq!(buf.as_bytes(), b"abcde");
    }

    #[test]
    fn test_fill_from_cuts_at_delimiter() {
        let mut buf = LineBuf::new();
        assert_eq!(buf.fill_from(b"first\nsecond"), 5);
        assert_eq!(buf.as_bytes(), b"first");
    }

    #[test]
    fn test_to_string_lossy() {
        let mut buf = LineBuf::new();
        buf.fill_from(&[b'o', b'k', 0xff]);
        assert_eq!(buf.to_string_lossy(), "ok\u{fffd}");
    }

    #[test]
    fn test_debug_shows_line() {
        let mut buf = LineBuf::with_capacity(16);
        buf.fill_from(b"hi");
        let debug = format!("{:?}", buf);
        assert!(debug.contains("LineBuf"));
        assert!(debug.contains("hi"));
    }

    #[test]
    fn test_trim_line_end() {
        assert_eq!(trim_line_end(b"bob\n"), b"bob");
        assert_eq!(trim_line_end(b"bob\r\n"), b"bob");
        assert_eq!(trim_line_end(b"bob"), b"bob");
        assert_eq!(trim_line_end(b"\r\n"), b"");
        assert_eq!(trim_line_end(b"  spaced  "), b"  spaced  ");
    }
}
