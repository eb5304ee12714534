//! TCP/TLS connection establishment and greeting validation.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_rustls::rustls::pki_types::ServerName;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;
use tracing::debug;

use crate::config::ConnectOptions;
use crate::error::{NntpError, Result};
use crate::reader::LineReader;

use super::state::ConnectionState;
use super::{NntpClient, Stream};

const TCP_CONNECT_TIMEOUT: Duration = Duration::from_secs(120);
const TLS_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(60);

impl NntpClient {
    /// Dial the server named in `options`, optionally negotiate TLS, and
    /// read the greeting.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP connection or TLS handshake fails or
    /// times out, or if the server's greeting is not a success status
    /// (200/201).
    pub async fn connect(options: ConnectOptions) -> Result<Self> {
        debug!("connecting to {}:{}", options.hostname, options.port);

        let addr = format!("{}:{}", options.hostname, options.port);
        let tcp_stream = timeout(TCP_CONNECT_TIMEOUT, TcpStream::connect(&addr))
            .await
            .map_err(|_| NntpError::Timeout)??;
        tcp_stream.set_nodelay(true).map_err(NntpError::Io)?;

        let stream = if options.tls {
            Stream::Tls(Box::new(establish_tls(&options.hostname, tcp_stream).await?))
        } else {
            Stream::Plain(tcp_stream)
        };

        let mut client = Self {
            reader: LineReader::new(stream),
            state: ConnectionState::Ready,
            options,
            current_group: None,
            dirty: false,
        };

        let mut greeting = client.read_response(None).await?;
        debug!(
            "server greeting: {} {}",
            greeting.status, greeting.status_text
        );
        if !greeting.is_success() {
            return Err(NntpError::Protocol {
                status: greeting.status,
                status_text: greeting.status_text,
            });
        }

        Ok(client)
    }

    /// Close the underlying transport.
    ///
    /// Idempotent: calling this more than once, or after [`quit`](Self::quit)
    /// has already closed the connection, is a no-op. Unlike `quit()`, this
    /// does not send anything to the server first — use it to tear down a
    /// connection that may already be in a bad state.
    pub async fn close(&mut self) -> Result<()> {
        if self.is_closed() {
            return Ok(());
        }
        let writer = self.reader_mut().get_mut();
        let _ = writer.shutdown().await;
        self.mark_closed();
        Ok(())
    }
}

async fn establish_tls(
    hostname: &str,
    tcp_stream: TcpStream,
) -> Result<tokio_rustls::client::TlsStream<TcpStream>> {
    use tokio_rustls::rustls::crypto::{ring, CryptoProvider};
    let _ = CryptoProvider::install_default(ring::default_provider());

    let mut root_store = RootCertStore::empty();
    root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let tls_config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    let connector = TlsConnector::from(Arc::new(tls_config));
    let server_name = ServerName::try_from(hostname.to_string())
        .map_err(|e| NntpError::Tls(format!("invalid domain name: {e}")))?;

    timeout(TLS_HANDSHAKE_TIMEOUT, connector.connect(server_name, tcp_stream))
        .await
        .map_err(|_| NntpError::Timeout)?
        .map_err(|e| NntpError::Tls(format!("TLS handshake failed: {e}")))
}
