//! LIST (RFC 3977 §7.6), NEWGROUPS (§7.3), NEWNEWS (§7.4).
//!
//! These all return raw lines: the closed set of LIST keywords (ACTIVE,
//! NEWSGROUPS, OVERVIEW.FMT, HEADERS, and server-specific extensions) each
//! have their own per-keyword line grammar, so parsing is left to the
//! caller rather than guessed at here.

use tracing::debug;

use crate::commands::Command;
use crate::error::{NntpError, Result};
use crate::response::codes;

use super::NntpClient;

impl NntpClient {
    /// `LIST [keyword [wildmat]]` (RFC 3977 §7.6). `keyword` selects the
    /// LIST variant (e.g. `"ACTIVE"`, `"NEWSGROUPS"`, `"OVERVIEW.FMT"`);
    /// `wildmat` filters by newsgroup pattern where the variant accepts one.
    pub async fn list(&mut self, keyword: Option<&str>, wildmat: Option<&str>) -> Result<Vec<String>> {
        debug!("LIST {:?} {:?}", keyword, wildmat);
        let mut args = Vec::new();
        if let Some(k) = keyword {
            args.push(k);
        }
        if let Some(w) = wildmat {
            args.push(w);
        }
        let mut resp = self.request(Command::List, &args).await?;

        if resp.status != codes::LIST_INFORMATION_FOLLOWS {
            return Err(NntpError::Protocol {
                status: resp.status,
                status_text: resp.status_text.clone(),
            });
        }
        let raw = resp.read_body_to_end().await?;
        drop(resp);
        Ok(lines_of(&raw))
    }

    /// Newsgroups created since `date`/`time` (RFC 3977 §7.3). `date` is
    /// `yyyymmdd`, `time` is `hhmmss`; `gmt` appends the `GMT` qualifier.
    pub async fn newgroups(&mut self, date: &str, time: &str, gmt: bool) -> Result<Vec<String>> {
        debug!("NEWGROUPS {} {} (gmt={})", date, time, gmt);
        let mut args = vec![date, time];
        if gmt {
            args.push("GMT");
        }
        let mut resp = self.request(Command::Newgroups, &args).await?;

        if resp.status != codes::NEW_NEWSGROUPS_FOLLOW {
            return Err(NntpError::Protocol {
                status: resp.status,
                status_text: resp.status_text.clone(),
            });
        }
        let raw = resp.read_body_to_end().await?;
        drop(resp);
        Ok(lines_of(&raw))
    }

    /// Message-IDs posted to groups matching `wildmat` since `date`/`time`
    /// (RFC 3977 §7.4).
    pub async fn newnews(
        &mut self,
        wildmat: &str,
        date: &str,
        time: &str,
        gmt: bool,
    ) -> Result<Vec<String>> {
        debug!("NEWNEWS {} {} {} (gmt={})", wildmat, date, time, gmt);
        let mut args = vec![wildmat, date, time];
        if gmt {
            args.push("GMT");
        }
        let mut resp = self.request(Command::Newnews, &args).await?;

        if resp.status != codes::NEW_ARTICLE_LIST_FOLLOWS {
            return Err(NntpError::Protocol {
                status: resp.status,
                status_text: resp.status_text.clone(),
            });
        }
        let raw = resp.read_body_to_end().await?;
        drop(resp);
        Ok(lines_of(&raw))
    }
}

fn lines_of(raw: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(raw)
        .split("\r\n")
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
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
    async fn list_active_returns_raw_lines() {
        let mut client = test_client(
            b"215 list follows\r\nmisc.test 3002322 3000234 y\r\n.\r\n",
        )
        .await;
        let lines = client.list(Some("ACTIVE"), Some("misc.*")).await.unwrap();
        assert_eq!(lines, vec!["misc.test 3002322 3000234 y".to_string()]);
    }

    #[tokio::test]
    async fn newnews_parses_message_ids() {
        let mut client = test_client(
            b"230 list of new articles follows\r\n<a@b>\r\n<c@d>\r\n.\r\n",
        )
        .await;
        let ids = client
            .newnews("misc.test", "20240101", "000000", true)
            .await
            .unwrap();
        assert_eq!(ids, vec!["<a@b>".to_string(), "<c@d>".to_string()]);
    }
}
