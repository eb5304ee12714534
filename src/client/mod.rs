//! Async NNTP client: owns the connection, serializes command/response
//! exchanges, and exposes the RFC command surface.

mod articles;
mod auth;
mod connection;
mod group_ops;
mod io;
mod listing;
mod metadata;
mod posting;
mod server;
mod state;

use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tracing::debug;

use crate::config::ConnectOptions;
use crate::reader::LineReader;
use state::ConnectionState;

/// The two transports a [`NntpClient`] may be speaking over.
enum Stream {
    Plain(TcpStream),
    Tls(Box<TlsStream<TcpStream>>),
}

impl AsyncRead for Stream {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        match self.get_mut() {
            Stream::Plain(s) => Pin::new(s).poll_read(cx, buf),
            Stream::Tls(s) => Pin::new(s.as_mut()).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for Stream {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<std::io::Result<usize>> {
        match self.get_mut() {
            Stream::Plain(s) => Pin::new(s).poll_write(cx, buf),
            Stream::Tls(s) => Pin::new(s.as_mut()).poll_write(cx, buf),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        match self.get_mut() {
            Stream::Plain(s) => Pin::new(s).poll_flush(cx),
            Stream::Tls(s) => Pin::new(s.as_mut()).poll_flush(cx),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        match self.get_mut() {
            Stream::Plain(s) => Pin::new(s).poll_shutdown(cx),
            Stream::Tls(s) => Pin::new(s.as_mut()).poll_shutdown(cx),
        }
    }
}

/// Async NNTP client.
///
/// # Example
///
/// ```no_run
/// use nntp_session::{NntpClient, ConnectOptions};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut client = NntpClient::connect(ConnectOptions::tls("news.example.com")).await?;
/// client.authinfo("user", "pass").await?;
/// let info = client.group("alt.test").await?;
/// println!("Group has {} articles", info.count);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub struct NntpClient {
    reader: LineReader<Stream>,
    state: ConnectionState,
    options: ConnectOptions,
    current_group: Option<String>,
    /// Set while a multi-line response body has been framed but not yet
    /// fully drained; the next command write auto-drains it first.
    dirty: bool,
}

impl NntpClient {
    pub(crate) fn reader_mut(&mut self) -> &mut LineReader<Stream> {
        &mut self.reader
    }

    pub(crate) fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    /// Mark the connection poisoned: an I/O or protocol error has left the
    /// stream in an indeterminate state, so no further command may be sent
    /// on it.
    pub(crate) fn mark_closed(&mut self) {
        self.state = ConnectionState::Closed;
    }

    /// The newsgroup most recently selected via `group()`/`listgroup()`,
    /// if any.
    pub fn current_group(&self) -> Option<&str> {
        self.current_group.as_deref()
    }

    /// Whether AUTHINFO has completed successfully on this connection.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, ConnectionState::Authenticated)
    }

    /// Whether the connection has been closed, either deliberately (via
    /// [`close`](Self::close)/[`quit`](Self::quit)) or because a fatal I/O
    /// or protocol error poisoned it. No further commands can succeed once
    /// this is `true`.
    pub fn is_closed(&self) -> bool {
        matches!(self.state, ConnectionState::Closed)
    }
}

impl Drop for NntpClient {
    fn drop(&mut self) {
        debug!("NntpClient dropped");
    }
}
