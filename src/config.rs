//! Connection configuration.

/// Verbosity hint passed through to the embedding application's logging
/// setup. This crate never installs a subscriber itself (that remains the
/// embedder's job) but carries the configured level for parity with the
/// recognized configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

/// Options for connecting to an NNTP server. Immutable for the lifetime of
/// a [`NntpClient`](crate::NntpClient).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectOptions {
    /// Server hostname (e.g. "news.example.com").
    pub hostname: String,

    /// Server port. Default 119 (plain), 563 (TLS).
    pub port: u16,

    /// Wrap the connection in TLS.
    pub tls: bool,

    /// Logging verbosity hint (see [`LogLevel`]).
    pub log_level: LogLevel,
}

impl ConnectOptions {
    pub fn new(hostname: impl Into<String>, port: u16, tls: bool) -> Self {
        Self {
            hostname: hostname.into(),
            port,
            tls,
            log_level: LogLevel::default(),
        }
    }

    /// A plain-text connection on the standard port (119).
    pub fn plain(hostname: impl Into<String>) -> Self {
        Self::new(hostname, 119, false)
    }

    /// A TLS connection on the standard secure port (563).
    pub fn tls(hostname: impl Into<String>) -> Self {
        Self::new(hostname, 563, true)
    }

    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_defaults_to_119() {
        let opts = ConnectOptions::plain("news.example.com");
        assert_eq!(opts.port, 119);
        assert!(!opts.tls);
    }

    #[test]
    fn tls_defaults_to_563() {
        let opts = ConnectOptions::tls("news.example.com");
        assert_eq!(opts.port, 563);
        assert!(opts.tls);
    }

    #[test]
    fn log_level_defaults_to_info() {
        let opts = ConnectOptions::plain("news.example.com");
        assert_eq!(opts.log_level, LogLevel::Info);
    }
}
