//! Line transport over a byte stream
//!
//! `send_line` writes one bounded line with a single write call and
//! `read_line` reads one line back a byte at a time, so nothing past the
//! delimiter is ever consumed from the channel.

use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::trace;

use linechat_utils::{LinechatError, Result};

use crate::line::{trim_line_end, LineBuf};
use crate::{DELIMITER, HELLO_PREFIX, MAX_LINE, MAX_PSEUDO};

/// Assemble `text` as one wire line into `dst`
///
/// The payload is cut at the first delimiter and truncated to
/// `capacity - 1` bytes, then exactly one delimiter is appended. Returns the
/// payload length.
pub fn encode_line(text: &[u8], capacity: usize, dst: &mut BytesMut) -> usize {
    let mut line = LineBuf::with_capacity(capacity);
    let len = line.fill_from(text);
    if len < text.len() {
        trace!(requested = text.len(), kept = len, "line truncated");
    }
    dst.reserve(len + 1);
    dst.put_slice(line.as_bytes());
    dst.put_u8(DELIMITER);
    len
}

/// Send `text` as one line
///
/// Exactly one write is attempted for the whole line and its delimiter; if
/// the channel accepts fewer bytes the call fails with
/// [`LinechatError::ShortWrite`].
pub async fn send_line<W>(writer: &mut W, text: impl AsRef<[u8]>) -> Result<()>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut line = BytesMut::with_capacity(MAX_LINE);
    encode_line(text.as_ref(), MAX_LINE, &mut line);

    let written = writer.write(&line).await?;
    if written != line.len() {
        return Err(LinechatError::ShortWrite {
            written,
            expected: line.len(),
        });
    }
    writer.flush().await?;

    trace!(bytes = written, "sent line");
    Ok(())
}

/// Normalize a typed pseudo: trim terminal artifacts and whitespace, keep at
/// most `MAX_PSEUDO - 1` bytes
pub fn bound_pseudo(raw: &[u8]) -> &[u8] {
    let pseudo = trim_line_end(raw).trim_ascii();
    let end = pseudo
        .iter()
        .position(|&b| b == DELIMITER)
        .unwrap_or(pseudo.len())
        .min(MAX_PSEUDO - 1);
    &pseudo[..end]
}

/// Send the `HELLO <pseudo>` handshake line
pub async fn send_hello<W>(writer: &mut W, pseudo: &[u8]) -> Result<()>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let pseudo = bound_pseudo(pseudo);
    let mut hello = Vec::with_capacity(HELLO_PREFIX.len() + pseudo.len());
    hello.extend_from_slice(HELLO_PREFIX.as_bytes());
    hello.extend_from_slice(pseudo);
    send_line(writer, hello).await
}

/// Read one line into `buf`
///
/// Returns `Ok(Some(n))` with `n` payload bytes (delimiter consumed, not
/// stored), `Ok(None)` at end-of-stream, or the read error. When the buffer
/// fills before a delimiter arrives the line is returned as is and the rest
/// stays on the channel for the next call. `buf` always holds exactly the
/// bytes collected by this call, whatever the outcome.
pub async fn read_line<R>(reader: &mut R, buf: &mut LineBuf) -> Result<Option<usize>>
where
    R: AsyncRead + Unpin + ?Sized,
{
    buf.clear();
    let mut byte = [0u8; 1];

    while !buf.is_full() {
        let n = match reader.read(&mut byte).await {
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        if n == 0 {
            trace!(partial = buf.len(), "end of stream");
            return Ok(None);
        }
        if byte[0] == DELIMITER {
            return Ok(Some(buf.len()));
        }
        buf.push(byte[0]);
    }

    trace!(len = buf.len(), "line filled buffer before delimiter");
    Ok(Some(buf.len()))
}
