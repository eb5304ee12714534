//! GROUP (RFC 3977 §6.1.1) and LISTGROUP (§6.1.2).

use tracing::debug;

use crate::commands::{self, Command, GroupInfo};
use crate::error::{NntpError, Result};
use crate::response::codes;

use super::NntpClient;

impl NntpClient {
    /// Select a newsgroup as the current group.
    ///
    /// # Errors
    ///
    /// Returns [`NntpError::NoSuchGroup`] (411) if the group doesn't exist.
    pub async fn group(&mut self, newsgroup: &str) -> Result<GroupInfo> {
        debug!("GROUP {}", newsgroup);
        let mut resp = self.request(Command::Group, &[newsgroup]).await?;

        if resp.status == codes::NO_SUCH_GROUP {
            return Err(NntpError::NoSuchGroup(newsgroup.to_string()));
        }
        if resp.status != codes::GROUP_SELECTED {
            return Err(NntpError::Protocol {
                status: resp.status,
                status_text: resp.status_text.clone(),
            });
        }

        let info = commands::parse_group_info(&resp.status_text)?;
        drop(resp);
        self.current_group = Some(newsgroup.to_string());
        Ok(info)
    }

    /// List article numbers currently available in `newsgroup`, optionally
    /// restricted to `range` (e.g. `"100-200"`, `"100-"`).
    ///
    /// Also selects `newsgroup` as the current group, per RFC 3977 §6.1.2.
    ///
    /// # Errors
    ///
    /// Returns [`NntpError::NoSuchGroup`] (411) if the group doesn't exist.
    pub async fn listgroup(&mut self, newsgroup: &str, range: Option<&str>) -> Result<Vec<u64>> {
        debug!("LISTGROUP {}", newsgroup);
        let mut args = vec![newsgroup];
        if let Some(r) = range {
            args.push(r);
        }
        let mut resp = self.request(Command::Listgroup, &args).await?;

        if resp.status == codes::NO_SUCH_GROUP {
            return Err(NntpError::NoSuchGroup(newsgroup.to_string()));
        }
        if resp.status != codes::GROUP_SELECTED {
            return Err(NntpError::Protocol {
                status: resp.status,
                status_text: resp.status_text.clone(),
            });
        }

        let raw = resp.read_body_to_end().await?;
        drop(resp);
        self.current_group = Some(newsgroup.to_string());

        let mut numbers = Vec::new();
        for line in raw.split(|&b| b == b'\n') {
            let trimmed = std::str::from_utf8(line).unwrap_or("").trim();
            if let Ok(n) = trimmed.parse::<u64>() {
                numbers.push(n);
            }
        }
        Ok(numbers)
    }
}
