//! Buffered line reader over an async byte stream.
//!
//! `tokio::io::BufReader` cannot provide a guaranteed-fill `peek(n)` — its
//! `fill_buf` only reads when the internal buffer is empty. The response
//! framer needs to look at the next couple of bytes without consuming them
//! (to tell a header line from the blank line that ends the header region),
//! so this is a small hand-rolled buffer instead.

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt};

const DEFAULT_CAPACITY: usize = 4 * 1024;

/// Buffered reader exposing `read_line`, `peek`, and `consume`.
pub struct LineReader<R> {
    inner: R,
    buf: Vec<u8>,
    pos: usize,
    filled: usize,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: vec![0u8; DEFAULT_CAPACITY],
            pos: 0,
            filled: 0,
        }
    }

    /// Direct access to the underlying stream, for writes.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    fn available(&self) -> &[u8] {
        &self.buf[self.pos..self.filled]
    }

    fn compact(&mut self) {
        if self.pos == 0 {
            return;
        }
        self.buf.copy_within(self.pos..self.filled, 0);
        self.filled -= self.pos;
        self.pos = 0;
    }

    async fn fill_more(&mut self) -> io::Result<usize> {
        if self.filled == self.buf.len() {
            if self.pos > 0 {
                self.compact();
            } else {
                self.buf.resize(self.buf.len() * 2, 0);
            }
        }
        let n = self.inner.read(&mut self.buf[self.filled..]).await?;
        self.filled += n;
        Ok(n)
    }

    /// Read up to and including the next LF. Returns `None` at a clean EOF
    /// with no pending bytes; an EOF in the middle of a line still returns
    /// the partial line once (next call then returns `None`).
    pub async fn read_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        loop {
            if let Some(idx) = self.available().iter().position(|&b| b == b'\n') {
                let end = self.pos + idx + 1;
                let line = self.buf[self.pos..end].to_vec();
                self.pos = end;
                return Ok(Some(line));
            }
            let n = self.fill_more().await?;
            if n == 0 {
                if self.pos == self.filled {
                    return Ok(None);
                }
                let line = self.buf[self.pos..self.filled].to_vec();
                self.pos = self.filled;
                return Ok(Some(line));
            }
        }
    }

    /// Return up to `n` upcoming bytes without consuming them. May return
    /// fewer than `n` bytes if the stream ends first.
    pub async fn peek(&mut self, n: usize) -> io::Result<&[u8]> {
        while self.filled - self.pos < n {
            let read = self.fill_more().await?;
            if read == 0 {
                break;
            }
        }
        Ok(&self.buf[self.pos..self.filled.min(self.pos + n)])
    }

    /// Discard `n` previously-peeked bytes.
    pub fn consume(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.filled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_simple_lines() {
        let data: &[u8] = b"one\r\ntwo\r\n";
        let mut r = LineReader::new(data);
        assert_eq!(r.read_line().await.unwrap().unwrap(), b"one\r\n");
        assert_eq!(r.read_line().await.unwrap().unwrap(), b"two\r\n");
        assert_eq!(r.read_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn peek_does_not_consume() {
        let data: &[u8] = b"abcdef\r\n";
        let mut r = LineReader::new(data);
        let peeked = r.peek(3).await.unwrap().to_vec();
        assert_eq!(peeked, b"abc");
        assert_eq!(r.read_line().await.unwrap().unwrap(), b"abcdef\r\n");
    }

    #[tokio::test]
    async fn peek_near_eof_returns_short_slice() {
        let data: &[u8] = b"ab";
        let mut r = LineReader::new(data);
        let peeked = r.peek(10).await.unwrap().to_vec();
        assert_eq!(peeked, b"ab");
    }

    #[tokio::test]
    async fn grows_buffer_for_long_lines() {
        let mut long_line = vec![b'x'; DEFAULT_CAPACITY * 3];
        long_line.extend_from_slice(b"\r\n");
        let mut r = LineReader::new(&long_line[..]);
        let line = r.read_line().await.unwrap().unwrap();
        assert_eq!(line.len(), DEFAULT_CAPACITY * 3 + 2);
    }

    #[tokio::test]
    async fn consume_advances_position() {
        let data: &[u8] = b"hello\r\n";
        let mut r = LineReader::new(data);
        let _ = r.peek(2).await.unwrap();
        r.consume(2);
        assert_eq!(r.read_line().await.unwrap().unwrap(), b"llo\r\n");
    }
}
