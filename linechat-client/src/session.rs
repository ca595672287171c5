//! Chat session state machine
//!
//! Drives one connection from the welcome line to disconnect: read the
//! welcome, send `HELLO <pseudo>`, then relay lines between the terminal and
//! the server until either side goes away.

use futures::StreamExt;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio_util::codec::FramedRead;
use tracing::{debug, error, info, warn};

use linechat_protocol::{
    bound_pseudo, read_line, send_hello, send_line, trim_line_end, BoundedLineCodec, LineBuf,
};
use linechat_utils::{LinechatError, Result};

/// Shown when the server closes the connection
pub const DISCONNECT_NOTICE: &str = "Server disconnected";

/// Shown before reading the pseudo from the terminal
pub const PSEUDO_PROMPT: &str = "Enter a pseudo: ";

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the welcome line
    Handshake,
    /// Sending `HELLO <pseudo>`
    Identify,
    /// Relaying lines in both directions
    Interactive,
    /// Channel shut down
    Closed,
}

/// Why a session ended normally
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The server closed the channel or the channel failed
    PeerClosed,
    /// Terminal input reached end of file
    InputClosed,
}

/// One chat session over a connected channel
///
/// `I` is the terminal input, `W` the terminal output.
pub struct Session<I, W> {
    reader: OwnedReadHalf,
    writer: OwnedWriteHalf,
    input: FramedRead<I, BoundedLineCodec>,
    output: W,
    line: LineBuf,
    state: SessionState,
}

impl<I, W> Session<I, W>
where
    I: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(stream: TcpStream, input: I, output: W) -> Self {
        let (reader, writer) = stream.into_split();
        Self {
            reader,
            writer,
            input: FramedRead::new(input, BoundedLineCodec::new()),
            output,
            line: LineBuf::new(),
            state: SessionState::Handshake,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }

    /// Run the session to completion
    ///
    /// `pseudo` skips the prompt when set. The channel is shut down on every
    /// exit path.
    pub async fn run(&mut self, pseudo: Option<&str>) -> Result<SessionEnd> {
        let result = self.drive(pseudo).await;
        self.close().await;
        result
    }

    async fn drive(&mut self, pseudo: Option<&str>) -> Result<SessionEnd> {
        self.receive_welcome().await?;
        self.identify(pseudo).await?;
        self.interact().await
    }

    async fn receive_welcome(&mut self) -> Result<()> {
        self.state = SessionState::Handshake;
        match read_line(&mut self.reader, &mut self.line).await {
            Ok(Some(n)) if n > 0 => self.display_line().await?,
            Ok(Some(_)) => debug!("empty welcome line"),
            Ok(None) => warn!("connection closed before the welcome line"),
            Err(e) => warn!("failed to read welcome line: {}", e),
        }
        Ok(())
    }

    async fn identify(&mut self, pseudo: Option<&str>) -> Result<()> {
        self.state = SessionState::Identify;

        let raw = match pseudo {
            Some(pseudo) => pseudo.as_bytes().to_vec(),
            None => {
                self.output.write_all(PSEUDO_PROMPT.as_bytes()).await?;
                self.output.flush().await?;
                let raw = match self.input.next().await {
                    Some(Ok(line)) => line.to_vec(),
                    Some(Err(e)) => {
                        return Err(LinechatError::input(format!("failed to read pseudo: {}", e)))
                    }
                    None => {
                        return Err(LinechatError::input("end of input before a pseudo was entered"))
                    }
                };
                self.discard_rest_of_line().await;
                raw
            }
        };

        send_hello(&mut self.writer, &raw).await?;
        info!(pseudo = %String::from_utf8_lossy(bound_pseudo(&raw)), "sent hello");
        Ok(())
    }

    /// Drop the remaining chunks of an overlong typed line
    async fn discard_rest_of_line(&mut self) {
        let mut discarded = 0;
        while !self.input.decoder().line_complete() {
            match self.input.next().await {
                Some(Ok(chunk)) => discarded += chunk.len(),
                Some(Err(e)) => {
                    debug!("terminal input error while discarding: {}", e);
                    break;
                }
                None => break,
            }
        }
        if discarded > 0 {
            debug!(bytes = discarded, "discarded rest of pseudo line");
        }
    }

    async fn interact(&mut self) -> Result<SessionEnd> {
        self.state = SessionState::Interactive;

        loop {
            // Terminal input is polled first when both sources are ready, and
            // only one source is served per wake. Input that never runs dry
            // starves the channel until it does.
            tokio::select! {
                biased;

                typed = self.input.next() => match typed {
                    Some(Ok(line)) => {
                        let line = trim_line_end(&line);
                        if !line.is_empty() {
                            match send_line(&mut self.writer, line).await {
                                Ok(()) => {}
                                Err(e) if e.is_disconnect() => {
                                    warn!("send failed, peer is gone: {}", e);
                                    return self.peer_closed().await;
                                }
                                Err(e) => {
                                    error!("failed to send line: {}", e);
                                    return Err(e);
                                }
                            }
                        }
                    }
                    Some(Err(e)) => debug!("ignoring terminal input error: {}", e),
                    None => {
                        info!("terminal input closed");
                        return Ok(SessionEnd::InputClosed);
                    }
                },

                ready = self.reader.readable() => {
                    if let Err(e) = ready {
                        error!("readiness wait failed: {}", e);
                        return Err(LinechatError::connection(format!(
                            "Readiness wait failed: {}",
                            e
                        )));
                    }

                    match read_line(&mut self.reader, &mut self.line).await {
                        Ok(Some(_)) => self.display_line().await?,
                        Ok(None) => return self.peer_closed().await,
                        Err(e) => {
                            debug!("channel read failed: {}", e);
                            return self.peer_closed().await;
                        }
                    }
                }
            }
        }
    }

    async fn peer_closed(&mut self) -> Result<SessionEnd> {
        info!("server closed the connection");
        self.output.write_all(DISCONNECT_NOTICE.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(SessionEnd::PeerClosed)
    }

    async fn display_line(&mut self) -> Result<()> {
        self.output.write_all(self.line.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await?;
        Ok(())
    }

    async fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        self.state = SessionState::Closed;

        if let Err(e) = self.writer.shutdown().await {
            debug!("channel shutdown failed: {}", e);
        }
        if let Err(e) = self.output.flush().await {
            debug!("output flush failed: {}", e);
        }
    }
}
