//! Bounded line codec for typed input

use bytes::{Buf, BytesMut};
use tokio_util::codec::Decoder;

use crate::{DELIMITER, MAX_LINE};

/// Splits a byte stream into lines of at most `capacity - 1` bytes
///
/// A longer line is emitted in several chunks, the way a bounded line read
/// would hand it over. Delimiters are consumed and never part of an item. A
/// trailing line without delimiter is emitted at end of input.
#[derive(Debug, Clone)]
pub struct BoundedLineCodec {
    max_payload: usize,
    /// Whether the last item closed its line
    line_complete: bool,
}

impl BoundedLineCodec {
    pub fn new() -> Self {
        Self::with_capacity(MAX_LINE)
    }

    /// Codec for lines stored in a buffer of `capacity` bytes (at least 2)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            max_payload: capacity.max(2) - 1,
            line_complete: true,
        }
    }

    pub fn max_payload(&self) -> usize {
        self.max_payload
    }

    /// Whether the last decoded item ended its line
    ///
    /// `false` after a chunk cut at the length bound: the next item continues
    /// the same typed line.
    pub fn line_complete(&self) -> bool {
        self.line_complete
    }
}

impl Default for BoundedLineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for BoundedLineCodec {
    type Item = BytesMut;
    type Error = std::io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let window = src.len().min(self.max_payload + 1);
        if let Some(pos) = src[..window].iter().position(|&b| b == DELIMITER) {
            let line = src.split_to(pos);
            src.advance(1);
            self.line_complete = true;
            return Ok(Some(line));
        }

        if src.len() >= self.max_payload {
            self.line_complete = false;
            return Ok(Some(src.split_to(self.max_payload)));
        }

        Ok(None)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(line) => Ok(Some(line)),
            None if src.is_empty() => Ok(None),
            None => {
                self.line_complete = true;
                Ok(Some(src.split_to(src.len())))
            }
        }
    }
}
