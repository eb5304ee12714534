//! The NNTP response value and its lazy multi-line body stream.

use crate::client::NntpClient;
use crate::error::{NntpError, Result};

/// A parsed NNTP response. Borrows the client until its body (if any) is
/// drained — this is what makes "no new command while a body is undrained"
/// a compile-time property rather than a runtime check: the borrow checker
/// will not let a second `&mut NntpClient` be taken while a `Response` is
/// alive.
pub struct Response<'a> {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    body: Option<BodyStream<'a>>,
}

impl<'a> Response<'a> {
    pub(crate) fn new(
        status: u16,
        status_text: String,
        headers: Vec<(String, String)>,
        body: Option<BodyStream<'a>>,
    ) -> Self {
        Self {
            status,
            status_text,
            headers,
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_continuation(&self) -> bool {
        (300..400).contains(&self.status)
    }

    pub fn is_error(&self) -> bool {
        self.status >= 400
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// The lazy body stream, if this response carries a multi-line block.
    pub fn body(&mut self) -> Option<&mut BodyStream<'a>> {
        self.body.as_mut()
    }

    /// Convenience for callers who want the whole body buffered: drains
    /// the stream and concatenates every line (CRLFs included).
    pub async fn read_body_to_end(&mut self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        if let Some(body) = self.body.as_mut() {
            while let Some(line) = body.next_line().await? {
                out.extend_from_slice(&line);
            }
        }
        Ok(out)
    }
}

/// A lazily-pulled, dot-unstuffed byte stream over a multi-line block.
/// Each call to [`next_line`](Self::next_line) performs at most one
/// underlying read; nothing is read ahead of caller demand, because the
/// same connection carries the next command's response.
pub struct BodyStream<'a> {
    client: &'a mut NntpClient,
    done: bool,
}

impl<'a> BodyStream<'a> {
    pub(crate) fn new(client: &'a mut NntpClient) -> Self {
        client.set_dirty(true);
        Self { client, done: false }
    }

    /// Pull the next line of the body, with dot-stuffing undone and the
    /// terminator line itself never returned. Returns `None` once the
    /// terminator has been consumed.
    ///
    /// A read failure or an end-of-stream before the terminator arrives
    /// poisons the connection: the next response would otherwise start
    /// mid-body, so the client is left unusable rather than silently
    /// misaligned.
    pub async fn next_line(&mut self) -> Result<Option<Vec<u8>>> {
        if self.done {
            return Ok(None);
        }
        let line = match self.client.reader_mut().read_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                self.client.mark_closed();
                return Err(NntpError::ProtocolError(
                    "body truncated before terminator".into(),
                ));
            }
            Err(e) => {
                self.client.mark_closed();
                return Err(NntpError::Io(e));
            }
        };

        if line == b".\r\n" || line == b".\n" {
            self.done = true;
            self.client.set_dirty(false);
            return Ok(None);
        }

        if line.first() == Some(&b'.') && line.len() > 1 {
            Ok(Some(line[1..].to_vec()))
        } else {
            Ok(Some(line))
        }
    }

    /// Drain the remainder of the body, discarding its contents.
    pub async fn drain(&mut self) -> Result<()> {
        while self.next_line().await?.is_some() {}
        Ok(())
    }
}

/// NNTP response status codes (RFC 3977 + RFC 4643).
#[allow(dead_code)]
pub mod codes {
    // 1xx informational
    pub const HELP_TEXT_FOLLOWS: u16 = 100;
    pub const CAPABILITY_LIST: u16 = 101;
    pub const SERVER_DATE: u16 = 111;

    // 2xx success
    pub const READY_POSTING_ALLOWED: u16 = 200;
    pub const READY_NO_POSTING: u16 = 201;
    pub const CLOSING_CONNECTION: u16 = 205;
    pub const GROUP_SELECTED: u16 = 211;
    pub const LIST_INFORMATION_FOLLOWS: u16 = 215;
    pub const ARTICLE_FOLLOWS: u16 = 220;
    pub const HEAD_FOLLOWS: u16 = 221;
    pub const BODY_FOLLOWS: u16 = 222;
    pub const ARTICLE_STAT: u16 = 223;
    pub const OVERVIEW_INFO_FOLLOWS: u16 = 224;
    pub const HEADERS_FOLLOW: u16 = 225;
    pub const NEW_ARTICLE_LIST_FOLLOWS: u16 = 230;
    pub const NEW_NEWSGROUPS_FOLLOW: u16 = 231;
    pub const ARTICLE_TRANSFERRED: u16 = 235;
    pub const ARTICLE_POSTED: u16 = 240;
    pub const AUTH_ACCEPTED: u16 = 281;

    // 3xx intermediate
    pub const SEND_ARTICLE_TRANSFER: u16 = 335;
    pub const SEND_ARTICLE: u16 = 340;
    pub const AUTH_CONTINUE: u16 = 381;

    // 4xx transient failure
    pub const SERVICE_UNAVAILABLE: u16 = 400;
    pub const NO_SUCH_GROUP: u16 = 411;
    pub const NO_GROUP_SELECTED: u16 = 412;
    pub const NO_CURRENT_ARTICLE: u16 = 420;
    pub const NO_NEXT_ARTICLE: u16 = 421;
    pub const NO_PREV_ARTICLE: u16 = 422;
    pub const NO_SUCH_ARTICLE_NUMBER: u16 = 423;
    pub const NO_SUCH_ARTICLE_ID: u16 = 430;
    pub const ARTICLE_NOT_WANTED: u16 = 435;
    pub const TRANSFER_NOT_POSSIBLE: u16 = 436;
    pub const TRANSFER_REJECTED: u16 = 437;
    pub const POSTING_NOT_PERMITTED: u16 = 440;
    pub const POSTING_FAILED: u16 = 441;
    pub const AUTH_REQUIRED: u16 = 480;
    pub const AUTH_REJECTED: u16 = 481;
    pub const AUTH_OUT_OF_SEQUENCE: u16 = 482;
    pub const ENCRYPTION_REQUIRED: u16 = 483;

    // 5xx permanent failure
    pub const COMMAND_NOT_RECOGNIZED: u16 = 500;
    pub const COMMAND_SYNTAX_ERROR: u16 = 501;
    pub const ACCESS_DENIED: u16 = 502;
    pub const FEATURE_NOT_SUPPORTED: u16 = 503;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_status_ranges() {
        let r = Response::new(240, "OK".into(), vec![], None);
        assert!(r.is_success());
        assert!(!r.is_error());

        let r = Response::new(381, "continue".into(), vec![], None);
        assert!(r.is_continuation());

        let r = Response::new(502, "denied".into(), vec![], None);
        assert!(r.is_error());
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let r = Response::new(
            220,
            String::new(),
            vec![("Subject".to_string(), "hi".to_string())],
            None,
        );
        assert_eq!(r.header("subject"), Some("hi"));
    }
}
