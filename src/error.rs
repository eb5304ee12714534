//! NNTP error types.

use thiserror::Error;

/// NNTP protocol and connection errors.
#[derive(Error, Debug)]
pub enum NntpError {
    /// Underlying socket read/write failed; the connection is no longer
    /// usable.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TLS handshake or configuration error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// A connect or command deadline elapsed.
    #[error("connection timeout")]
    Timeout,

    /// Status line malformed, header line malformed inside the 220/221
    /// region, or the multi-line terminator never arrived before EOF.
    /// Fatal for the connection.
    #[error("protocol error: {0}")]
    ProtocolError(String),

    /// A caller-supplied command line exceeds the 512-octet limit (RFC
    /// 3977 §3.1).
    #[error("command line too long")]
    CommandTooLong,

    /// Generic NNTP 4xx/5xx the typed wrappers don't special-case.
    #[error("NNTP error {status}: {status_text}")]
    Protocol { status: u16, status_text: String },

    /// AUTHINFO failed (481).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// GROUP/LISTGROUP named a newsgroup the server doesn't have (411).
    #[error("no such newsgroup: {0}")]
    NoSuchGroup(String),

    /// ARTICLE/HEAD/BODY/STAT referenced an article that doesn't exist
    /// (423/430).
    #[error("no such article: {0}")]
    NoSuchArticle(String),

    /// A group-relative command was used before GROUP/LISTGROUP (412).
    #[error("no newsgroup selected")]
    NoGroupSelected,

    /// NEXT/LAST/current-article commands with no current article
    /// (420).
    #[error("invalid or missing current article")]
    InvalidArticleNumber,

    /// POST refused outright (440).
    #[error("posting not permitted")]
    PostingNotPermitted,

    /// POST's article text was rejected (441).
    #[error("posting failed: {0}")]
    PostingFailed(String),

    /// IHAVE: server already has the article (435).
    #[error("article not wanted")]
    ArticleNotWanted,

    /// IHAVE: temporary failure, caller may retry (436).
    #[error("transfer not possible: {0}")]
    TransferNotPossible(String),

    /// IHAVE: permanent rejection, do not retry (437).
    #[error("transfer rejected: {0}")]
    TransferRejected(String),

    /// AUTHINFO: TLS required before authenticating (483).
    #[error("encryption required: {0}")]
    EncryptionRequired(String),

    /// The peer closed the connection mid-response.
    #[error("connection closed")]
    ConnectionClosed,

    /// A new command was issued while a previous response's body was still
    /// undrained. `request()` auto-drains instead of raising this in
    /// practice, but it stays part of the taxonomy for callers driving the
    /// connection through lower-level entry points where draining itself
    /// could fail.
    #[error("previous response body was not drained before the next command")]
    PreviousBodyUndrained,

    /// Advisory: a command returned 480 (authentication required). Not
    /// raised internally — 480 is returned to the caller as a normal
    /// [`Response`](crate::response::Response) — but available for callers
    /// who prefer to map it onto this taxonomy themselves.
    #[error("authentication required")]
    NotAuthenticated,
}

/// Result type alias using [`NntpError`].
pub type Result<T> = std::result::Result<T, NntpError>;
