//! Article encoder: writes an [`Article`](crate::article::Article) to the
//! wire after a 340 (POST) or 335 (IHAVE) intermediate response,
//! dot-stuffing the body on the fly.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::article::{Article, ArticleBody};
use crate::error::Result;

const STREAM_CHUNK_SIZE: usize = 8 * 1024;

/// Tracks "are we at the start of a line" across arbitrary chunk
/// boundaries, so dot-stuffing is correct for streamed bodies and not just
/// whole in-memory strings.
pub struct DotStuffer {
    at_line_start: bool,
}

impl DotStuffer {
    pub fn new() -> Self {
        Self { at_line_start: true }
    }

    /// Dot-stuff `chunk`, appending the result to `out`.
    pub fn process(&mut self, chunk: &[u8], out: &mut Vec<u8>) {
        out.reserve(chunk.len());
        for &b in chunk {
            if self.at_line_start && b == b'.' {
                out.push(b'.');
            }
            out.push(b);
            self.at_line_start = b == b'\n';
        }
    }

    /// Whether the most recently processed byte was a line feed.
    pub fn at_line_start(&self) -> bool {
        self.at_line_start
    }
}

impl Default for DotStuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Streams an [`Article`] to a writer: headers, blank separator, stuffed
/// body, terminator.
pub struct ArticleEncoder;

impl ArticleEncoder {
    pub async fn write<W: AsyncWrite + Unpin>(writer: &mut W, article: &mut Article) -> Result<()> {
        let mut out = Vec::new();
        for (name, value) in article.headers() {
            out.extend_from_slice(name.as_bytes());
            out.extend_from_slice(b": ");
            out.extend_from_slice(value.as_bytes());
            out.extend_from_slice(b"\r\n");
        }
        let had_headers = !article.headers().is_empty();
        writer.write_all(&out).await?;

        let mut stuffer = DotStuffer::new();
        let mut buf = Vec::new();

        match article.body_mut() {
            ArticleBody::Bytes(bytes) => {
                if had_headers {
                    writer.write_all(b"\r\n").await?;
                }
                stuffer.process(bytes, &mut buf);
                writer.write_all(&buf).await?;
            }
            ArticleBody::Stream(stream) => {
                if had_headers {
                    writer.write_all(b"\r\n").await?;
                }
                write_stuffed_stream(writer, stream.as_mut(), &mut stuffer).await?;
            }
        }

        if stuffer.at_line_start() {
            writer.write_all(b".\r\n").await?;
        } else {
            writer.write_all(b"\r\n.\r\n").await?;
        }
        writer.flush().await?;
        Ok(())
    }
}

async fn write_stuffed_stream<W: AsyncWrite + Unpin, S: AsyncRead + Unpin + ?Sized>(
    writer: &mut W,
    stream: &mut S,
    stuffer: &mut DotStuffer,
) -> Result<()> {
    let mut chunk = vec![0u8; STREAM_CHUNK_SIZE];
    let mut out = Vec::with_capacity(STREAM_CHUNK_SIZE + STREAM_CHUNK_SIZE / 32);
    loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        out.clear();
        stuffer.process(&chunk[..n], &mut out);
        writer.write_all(&out).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stuffs_leading_dot() {
        let mut s = DotStuffer::new();
        let mut out = Vec::new();
        s.process(b".line\r\n", &mut out);
        assert_eq!(out, b"..line\r\n");
    }

    #[test]
    fn does_not_stuff_mid_line_dot() {
        let mut s = DotStuffer::new();
        let mut out = Vec::new();
        s.process(b"a.b\r\n", &mut out);
        assert_eq!(out, b"a.b\r\n");
    }

    #[test]
    fn stuffs_correctly_across_chunk_boundary() {
        // simulate the body ".line\r\n" split into two reads, a dot at the
        // very start of the second chunk right after a line boundary.
        let mut s = DotStuffer::new();
        let mut out = Vec::new();
        s.process(b"first\r\n", &mut out);
        s.process(b".second\r\n", &mut out);
        assert_eq!(out, b"first\r\n..second\r\n");
    }

    #[test]
    fn tracks_line_start_across_byte_by_byte_chunks() {
        let mut s = DotStuffer::new();
        let mut out = Vec::new();
        for &b in b".x\r\n" {
            s.process(&[b], &mut out);
        }
        assert_eq!(out, b"..x\r\n");
    }

    #[tokio::test]
    async fn encodes_headers_and_body() {
        use crate::article::ArticleBuilder;
        let mut article = ArticleBuilder::new()
            .header("From", "a@b")
            .header("Subject", "hi")
            .body(b"hello\r\n.line\r\n".to_vec())
            .build()
            .unwrap();

        let mut out = Vec::new();
        ArticleEncoder::write(&mut out, &mut article).await.unwrap();

        assert_eq!(
            out,
            b"From: a@b\r\nSubject: hi\r\n\r\nhello\r\n..line\r\n.\r\n".to_vec()
        );
    }

    #[tokio::test]
    async fn empty_body_emits_bare_terminator() {
        use crate::article::ArticleBuilder;
        let mut article = ArticleBuilder::new()
            .header("From", "a@b")
            .build()
            .unwrap();

        let mut out = Vec::new();
        ArticleEncoder::write(&mut out, &mut article).await.unwrap();
        assert_eq!(out, b"From: a@b\r\n\r\n.\r\n".to_vec());
    }
}
