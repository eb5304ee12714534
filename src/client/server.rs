//! Server-information and mode-negotiation commands: CAPABILITIES (RFC 3977
//! §5.2), MODE READER (§5.3), DATE (§7.1), HELP (§7.2).

use tracing::debug;

use crate::capabilities::Capabilities;
use crate::commands::Command;
use crate::error::{NntpError, Result};
use crate::response::codes;

use super::NntpClient;

impl NntpClient {
    /// Fetch the server's advertised capability list.
    pub async fn capabilities(&mut self) -> Result<Capabilities> {
        debug!("CAPABILITIES");
        let mut resp = self.request(Command::Capabilities, &[]).await?;

        if resp.status != codes::CAPABILITY_LIST {
            return Err(NntpError::Protocol {
                status: resp.status,
                status_text: resp.status_text.clone(),
            });
        }
        let raw = resp.read_body_to_end().await?;
        drop(resp);
        let lines: Vec<String> = String::from_utf8_lossy(&raw)
            .split("\r\n")
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Capabilities::parse(&lines))
    }

    /// Switch the connection into reader mode. Returns `true` if posting is
    /// allowed (200), `false` if it's not (201).
    pub async fn mode_reader(&mut self) -> Result<bool> {
        debug!("MODE READER");
        let resp = self.request(Command::ModeReader, &[]).await?;
        match resp.status {
            codes::READY_POSTING_ALLOWED => Ok(true),
            codes::READY_NO_POSTING => Ok(false),
            status => Err(NntpError::Protocol {
                status,
                status_text: resp.status_text.clone(),
            }),
        }
    }

    /// Fetch the server's current UTC date and time as a `yyyyMMddhhmmss`
    /// string.
    pub async fn date(&mut self) -> Result<String> {
        debug!("DATE");
        let resp = self.request(Command::Date, &[]).await?;
        if resp.status != codes::SERVER_DATE {
            return Err(NntpError::Protocol {
                status: resp.status,
                status_text: resp.status_text.clone(),
            });
        }
        Ok(resp.status_text.trim().to_string())
    }

    /// Fetch the server's help text as raw lines.
    pub async fn help(&mut self) -> Result<Vec<String>> {
        debug!("HELP");
        let mut resp = self.request(Command::Help, &[]).await?;
        if resp.status != codes::HELP_TEXT_FOLLOWS {
            return Err(NntpError::Protocol {
                status: resp.status,
                status_text: resp.status_text.clone(),
            });
        }
        let raw = resp.read_body_to_end().await?;
        drop(resp);
        Ok(String::from_utf8_lossy(&raw)
            .split("\r\n")
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::state::ConnectionState;
    use crate::config::ConnectOptions;
    use crate::reader::LineReader;
    use tokio::io::{duplex, AsyncWriteExt};

    async fn test_client(wire: &'static [u8]) -> NntpClient {
        let (client_half, mut server_half) = duplex(8192);
        tokio::spawn(async move {
            let _ = server_half.write_all(wire).await;
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
    async fn capabilities_parses_entries() {
        let mut client = test_client(
            b"101 capability list follows\r\nVERSION 2\r\nREADER\r\nPOST\r\n.\r\n",
        )
        .await;
        let caps = client.capabilities().await.unwrap();
        assert!(caps.has("READER"));
        assert!(caps.has("POST"));
    }

    #[tokio::test]
    async fn mode_reader_no_posting() {
        let mut client = test_client(b"201 reader mode, posting prohibited\r\n").await;
        assert_eq!(client.mode_reader().await.unwrap(), false);
    }

    #[tokio::test]
    async fn date_returns_status_text() {
        let mut client = test_client(b"111 20240101120000\r\n").await;
        assert_eq!(client.date().await.unwrap(), "20240101120000");
    }
}
