//! Article data model: the input to POST/IHAVE.
//!
//! Headers are an ordered multimap (insertion order preserved, repeat names
//! allowed) rather than a fixed RFC 5536 struct — article parsing beyond
//! the header/body split is out of scope here, so the model only needs to
//! carry what the encoder emits.

use std::pin::Pin;

use tokio::io::AsyncRead;

use crate::error::{NntpError, Result};

/// The body of an article to be posted or transferred: either fully
/// buffered bytes, or a lazily-read stream (so a large upload need not be
/// materialized in memory before sending).
pub enum ArticleBody {
    Bytes(Vec<u8>),
    Stream(Pin<Box<dyn AsyncRead + Send>>),
}

/// An article ready to be sent via POST or IHAVE.
pub struct Article {
    headers: Vec<(String, String)>,
    body: ArticleBody,
}

impl Article {
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body_mut(&mut self) -> &mut ArticleBody {
        &mut self.body
    }

    /// Look up the first header matching `name`, case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn message_id(&self) -> Option<&str> {
        self.header("Message-ID")
    }
}

/// Builder for [`Article`]: headers in insertion order, then a body.
#[derive(Default)]
pub struct ArticleBuilder {
    headers: Vec<(String, String)>,
    body: Option<ArticleBody>,
}

impl ArticleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn from(self, value: impl Into<String>) -> Self {
        self.header("From", value)
    }

    pub fn subject(self, value: impl Into<String>) -> Self {
        self.header("Subject", value)
    }

    pub fn newsgroups<I, S>(self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let joined = groups
            .into_iter()
            .map(Into::into)
            .collect::<Vec<_>>()
            .join(",");
        self.header("Newsgroups", joined)
    }

    pub fn message_id(self, value: impl Into<String>) -> Self {
        self.header("Message-ID", value)
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(ArticleBody::Bytes(body.into()));
        self
    }

    pub fn body_stream(mut self, stream: impl AsyncRead + Send + 'static) -> Self {
        self.body = Some(ArticleBody::Stream(Box::pin(stream)));
        self
    }

    pub fn build(self) -> Result<Article> {
        if self.headers.is_empty() {
            return Err(NntpError::ProtocolError(
                "article must have at least one header".into(),
            ));
        }
        Ok(Article {
            headers: self.headers,
            body: self.body.unwrap_or_else(|| ArticleBody::Bytes(Vec::new())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_preserves_header_order_and_repeats() {
        let article = ArticleBuilder::new()
            .header("From", "a@b")
            .header("Newsgroups", "misc.test")
            .header("Newsgroups", "misc.other")
            .body(b"hi".to_vec())
            .build()
            .unwrap();

        let names: Vec<&str> = article.headers().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["From", "Newsgroups", "Newsgroups"]);
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let article = ArticleBuilder::new()
            .header("Message-ID", "<a@b>")
            .body(Vec::new())
            .build()
            .unwrap();
        assert_eq!(article.header("message-id"), Some("<a@b>"));
        assert_eq!(article.message_id(), Some("<a@b>"));
    }

    #[test]
    fn empty_headers_rejected() {
        assert!(ArticleBuilder::new().body(Vec::new()).build().is_err());
    }

    #[test]
    fn newsgroups_are_comma_joined() {
        let article = ArticleBuilder::new()
            .from("a@b")
            .newsgroups(["misc.test", "misc.other"])
            .body(Vec::new())
            .build()
            .unwrap();
        assert_eq!(article.header("Newsgroups"), Some("misc.test,misc.other"));
    }
}
