//! OVER (RFC 3977 §8.3) and HDR (§8.5): per-article metadata without
//! downloading full content.

use tracing::{trace, warn};

use crate::commands::{self, Command, HdrEntry, OverviewEntry};
use crate::error::{NntpError, Result};
use crate::response::codes;

use super::NntpClient;

impl NntpClient {
    /// Fetch overview metadata (subject, author, date, message-id,
    /// references, byte/line counts) for a range, a single article, or the
    /// current article (`range_or_msgid == ""`).
    ///
    /// Lines that fail to parse are logged and skipped rather than failing
    /// the whole call.
    pub async fn over(&mut self, range_or_msgid: &str) -> Result<Vec<OverviewEntry>> {
        trace!("OVER {}", range_or_msgid);
        let args: &[&str] = if range_or_msgid.is_empty() {
            &[]
        } else {
            &[range_or_msgid]
        };
        let mut resp = self.request(Command::Over, args).await?;

        if resp.status == codes::NO_GROUP_SELECTED {
            return Err(NntpError::NoGroupSelected);
        }
        if resp.status == codes::NO_CURRENT_ARTICLE {
            return Err(NntpError::InvalidArticleNumber);
        }
        if !resp.is_success() {
            return Err(NntpError::Protocol {
                status: resp.status,
                status_text: resp.status_text.clone(),
            });
        }

        let raw = resp.read_body_to_end().await?;
        drop(resp);
        Ok(parse_lines(&raw, commands::parse_overview_line, "OVER"))
    }

    /// Fetch a single header field's value across a range, a single
    /// article, or the current article.
    pub async fn hdr(&mut self, field: &str, range_or_msgid: &str) -> Result<Vec<HdrEntry>> {
        trace!("HDR {} {}", field, range_or_msgid);
        let args: Vec<&str> = if range_or_msgid.is_empty() {
            vec![field]
        } else {
            vec![field, range_or_msgid]
        };
        let mut resp = self.request(Command::Hdr, &args).await?;

        if resp.status == codes::NO_GROUP_SELECTED {
            return Err(NntpError::NoGroupSelected);
        }
        if resp.status == codes::NO_CURRENT_ARTICLE {
            return Err(NntpError::InvalidArticleNumber);
        }
        if !resp.is_success() {
            return Err(NntpError::Protocol {
                status: resp.status,
                status_text: resp.status_text.clone(),
            });
        }

        let raw = resp.read_body_to_end().await?;
        drop(resp);
        Ok(parse_lines(&raw, commands::parse_hdr_line, "HDR"))
    }
}

fn parse_lines<T>(
    raw: &[u8],
    parse: impl Fn(&str) -> Result<T>,
    label: &str,
) -> Vec<T> {
    let text = String::from_utf8_lossy(raw);
    let mut entries = Vec::new();
    for line in text.split("\r\n").filter(|l| !l.is_empty()) {
        match parse(line) {
            Ok(entry) => entries.push(entry),
            Err(e) => warn!("failed to parse {} line {:?}: {}", label, line, e),
        }
    }
    entries
}
