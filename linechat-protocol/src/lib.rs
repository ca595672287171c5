//! linechat-protocol: Newline-delimited line transport
//!
//! A line is a run of bytes without `\n`, terminated on the wire by exactly
//! one `\n`. Lines are bounded by a fixed buffer capacity; overlong payloads
//! are truncated when sent and split when received.

pub mod codec;
pub mod line;
pub mod transport;

// Re-export main types at crate root
pub use codec::BoundedLineCodec;
pub use line::{trim_line_end, LineBuf};
pub use transport::{bound_pseudo, encode_line, read_line, send_hello, send_line};

/// Capacity of a line buffer, delimiter slot included
pub const MAX_LINE: usize = 256;

/// Capacity of the pseudo buffer; a pseudo holds at most `MAX_PSEUDO - 1` bytes
pub const MAX_PSEUDO: usize = 16;

/// Line delimiter on the wire
pub const DELIMITER: u8 = b'\n';

/// Prefix of the first line a client sends after connecting
pub const HELLO_PREFIX: &str = "HELLO ";
