//! Command/response orchestration: the only place that actually talks to
//! the wire. Every typed command method on [`NntpClient`] goes through
//! [`NntpClient::request`].

use tokio::io::AsyncWriteExt;

use crate::commands::{self, Command};
use crate::error::{NntpError, Result};
use crate::framer;
use crate::response::{BodyStream, Response};

use super::NntpClient;

impl NntpClient {
    /// Send `command` with `args` and read its response.
    ///
    /// If the previous response's body was left undrained (the caller
    /// dropped the [`Response`] without reading it to the end), it is
    /// drained first — `Drop` cannot do that itself since draining
    /// requires I/O.
    pub(crate) async fn request(
        &mut self,
        command: Command,
        args: &[&str],
    ) -> Result<Response<'_>> {
        if self.is_closed() {
            return Err(NntpError::ConnectionClosed);
        }
        if let Err(e) = self.drain_if_dirty().await {
            self.mark_closed();
            return Err(e);
        }
        let line = commands::build_command_line(command.keyword(), args)?;
        if let Err(e) = self.write_line(&line).await {
            self.mark_closed();
            return Err(e);
        }
        // `read_response` poisons the connection itself on any I/O or
        // protocol error, so its result is returned as-is.
        self.read_response(Some(command)).await
    }

    /// Drain and discard any undrained multi-line body left over from a
    /// previous response.
    pub(crate) async fn drain_if_dirty(&mut self) -> Result<()> {
        if self.dirty {
            let mut body = BodyStream::new(self);
            body.drain().await?;
        }
        Ok(())
    }

    async fn write_line(&mut self, line: &str) -> Result<()> {
        let result: std::io::Result<()> = async {
            let writer = self.reader_mut().get_mut();
            writer.write_all(line.as_bytes()).await?;
            writer.flush().await
        }
        .await;
        result.map_err(NntpError::Io)
    }

    /// Read one status line, its inline headers (if any), and frame the
    /// multi-line body (if any). `hint` disambiguates the 211 status
    /// between GROUP and LISTGROUP.
    ///
    /// An I/O failure, a malformed status line, or a truncated header block
    /// poisons the connection — the caller can check this via
    /// [`NntpClient::is_closed`].
    pub(crate) async fn read_response(&mut self, hint: Option<Command>) -> Result<Response<'_>> {
        let line = match self.reader.read_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                self.mark_closed();
                return Err(NntpError::ConnectionClosed);
            }
            Err(e) => {
                self.mark_closed();
                return Err(NntpError::Io(e));
            }
        };

        let (status, status_text) = match framer::parse_status_line(&line) {
            Ok(v) => v,
            Err(e) => {
                self.mark_closed();
                return Err(e);
            }
        };

        let headers = if framer::has_inline_headers(status) {
            match self.read_inline_headers().await {
                Ok(h) => h,
                Err(e) => {
                    self.mark_closed();
                    return Err(e);
                }
            }
        } else {
            Vec::new()
        };

        let body = if framer::is_multiline(status, hint, &status_text) {
            Some(BodyStream::new(self))
        } else {
            None
        };

        Ok(Response::new(status, status_text, headers, body))
    }

    /// Parse the RFC 5322-ish header block that precedes the body of an
    /// ARTICLE (220) or HEAD (221) response, stopping at the blank line
    /// that separates headers from body.
    async fn read_inline_headers(&mut self) -> Result<Vec<(String, String)>> {
        let mut headers = Vec::new();
        loop {
            let first = self.reader.peek(1).await?;
            if first.is_empty() || first[0] == b'\r' || first[0] == b'\n' {
                self.reader.read_line().await?;
                break;
            }
            let line = self
                .reader
                .read_line()
                .await?
                .ok_or_else(|| NntpError::ProtocolError("truncated header block".into()))?;
            match framer::parse_header_line(&line) {
                Some(header) => headers.push(header),
                None => break,
            }
        }
        Ok(headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::state::ConnectionState;
    use crate::config::ConnectOptions;
    use crate::reader::LineReader;
    use tokio::io::{duplex, AsyncWriteExt as _};

    async fn test_client(wire: &'static [u8]) -> NntpClient {
        let (client_half, mut server_half) = duplex(8192);
        tokio::spawn(async move {
            let _ = server_half.write_all(wire).await;
            // Keep the write half open for the duration of the test so the
            // client never observes a premature EOF mid-response.
            std::future::pending::<()>().await;
        });
        NntpClient {
            reader: LineReader::new(client_half),
            state: ConnectionState::Ready,
            options: ConnectOptions::plain("test"),
            current_group: None,
            dirty: false,
        }
    }

    #[tokio::test]
    async fn reads_single_line_response() {
        let mut client = test_client(b"211 1234 3000234 3002322 misc.test\r\n").await;
        let resp = client.read_response(Some(Command::Group)).await.unwrap();
        assert_eq!(resp.status, 211);
        assert!(resp.headers.is_empty());
    }

    #[tokio::test]
    async fn reads_multiline_body_via_listgroup_hint() {
        let mut client =
            test_client(b"211 2 1 2 misc.test list follows\r\n1\r\n2\r\n.\r\n").await;
        let mut resp = client
            .read_response(Some(Command::Listgroup))
            .await
            .unwrap();
        let body = resp.read_body_to_end().await.unwrap();
        assert_eq!(body, b"1\r\n2\r\n".to_vec());
    }

    #[tokio::test]
    async fn parses_inline_headers_on_article() {
        let mut client = test_client(
            b"220 1 <a@b> article\r\nFrom: a@b\r\nSubject: hi\r\n\r\nbody line\r\n.\r\n",
        )
        .await;
        let mut resp = client.read_response(Some(Command::Article)).await.unwrap();
        assert_eq!(resp.header("subject"), Some("hi"));
        let body = resp.read_body_to_end().await.unwrap();
        assert_eq!(body, b"body line\r\n".to_vec());
    }

    #[tokio::test]
    async fn single_line_error_response_has_no_body() {
        let mut client = test_client(b"411 no such group\r\n").await;
        let mut resp = client.read_response(Some(Command::Group)).await.unwrap();
        assert!(resp.is_error());
        assert!(resp.body().is_none());
    }

    #[tokio::test]
    async fn decodes_dot_stuffed_line_in_body() {
        let mut client =
            test_client(b"100 help text follows\r\nLine one\r\n..dotted\r\n.\r\n").await;
        let mut resp = client.read_response(Some(Command::Help)).await.unwrap();
        let body = resp.read_body_to_end().await.unwrap();
        assert_eq!(body, b"Line one\r\n.dotted\r\n".to_vec());
    }

    #[tokio::test]
    async fn fatal_io_error_poisons_the_connection() {
        let (client_half, server_half) = duplex(8192);
        drop(server_half);
        let mut client = NntpClient {
            reader: LineReader::new(client_half),
            state: ConnectionState::Ready,
            options: ConnectOptions::plain("test"),
            current_group: None,
            dirty: false,
        };
        let err = client.read_response(None).await.unwrap_err();
        assert!(matches!(err, NntpError::ConnectionClosed));
        assert!(client.is_closed());
    }

    #[tokio::test]
    async fn request_rejects_once_closed() {
        let (client_half, server_half) = duplex(8192);
        drop(server_half);
        let mut client = NntpClient {
            reader: LineReader::new(client_half),
            state: ConnectionState::Closed,
            options: ConnectOptions::plain("test"),
            current_group: None,
            dirty: false,
        };
        let err = client.request(Command::Date, &[]).await.unwrap_err();
        assert!(matches!(err, NntpError::ConnectionClosed));
    }
}
