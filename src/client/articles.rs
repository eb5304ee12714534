//! Article retrieval and navigation (RFC 3977 §6.1.3-6.1.4, §6.2).

use tracing::trace;

use crate::commands::{self, ArticleInfo, Command};
use crate::error::{NntpError, Result};
use crate::response::{codes, Response};

use super::NntpClient;

impl NntpClient {
    /// Fetch the full article (headers + body) by number or message-id.
    ///
    /// The returned [`Response`] carries the parsed headers directly and
    /// the body as a lazy [`BodyStream`](crate::response::BodyStream).
    pub async fn article(&mut self, id: &str) -> Result<Response<'_>> {
        trace!("ARTICLE {}", id);
        self.fetch(Command::Article, id).await
    }

    /// Fetch article headers only.
    pub async fn head(&mut self, id: &str) -> Result<Response<'_>> {
        trace!("HEAD {}", id);
        self.fetch(Command::Head, id).await
    }

    /// Fetch article body only.
    pub async fn body(&mut self, id: &str) -> Result<Response<'_>> {
        trace!("BODY {}", id);
        self.fetch(Command::Body, id).await
    }

    async fn fetch(&mut self, command: Command, id: &str) -> Result<Response<'_>> {
        let arg = commands::wrap_message_id(id);
        let resp = self.request(command, &[&arg]).await?;

        if resp.status == codes::NO_SUCH_ARTICLE_ID || resp.status == codes::NO_SUCH_ARTICLE_NUMBER
        {
            return Err(NntpError::NoSuchArticle(id.to_string()));
        }
        if !resp.is_success() {
            return Err(NntpError::Protocol {
                status: resp.status,
                status_text: resp.status_text.clone(),
            });
        }
        Ok(resp)
    }

    /// Check article existence and get its number/message-id without
    /// retrieving content (RFC 3977 §6.2.4).
    pub async fn stat(&mut self, id: &str) -> Result<ArticleInfo> {
        trace!("STAT {}", id);
        let arg = commands::wrap_message_id(id);
        let resp = self.request(Command::Stat, &[&arg]).await?;
        finish_article_info(resp, id)
    }

    /// Move to and report the next article in the current newsgroup
    /// (RFC 3977 §6.1.4).
    pub async fn next(&mut self) -> Result<ArticleInfo> {
        trace!("NEXT");
        let resp = self.request(Command::Next, &[]).await?;
        if resp.status == codes::NO_NEXT_ARTICLE {
            return Err(NntpError::NoSuchArticle("no next article".into()));
        }
        finish_article_info(resp, "")
    }

    /// Move to and report the previous article in the current newsgroup
    /// (RFC 3977 §6.1.3).
    pub async fn last(&mut self) -> Result<ArticleInfo> {
        trace!("LAST");
        let resp = self.request(Command::Last, &[]).await?;
        if resp.status == codes::NO_PREV_ARTICLE {
            return Err(NntpError::NoSuchArticle("no previous article".into()));
        }
        finish_article_info(resp, "")
    }
}

fn finish_article_info(resp: Response<'_>, id: &str) -> Result<ArticleInfo> {
    match resp.status {
        codes::NO_SUCH_ARTICLE_ID | codes::NO_SUCH_ARTICLE_NUMBER => {
            Err(NntpError::NoSuchArticle(id.to_string()))
        }
        codes::NO_GROUP_SELECTED => Err(NntpError::NoGroupSelected),
        codes::NO_CURRENT_ARTICLE => Err(NntpError::InvalidArticleNumber),
        codes::ARTICLE_STAT => commands::parse_article_info(&resp.status_text),
        _ => Err(NntpError::Protocol {
            status: resp.status,
            status_text: resp.status_text.clone(),
        }),
    }
}
