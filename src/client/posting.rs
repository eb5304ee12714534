//! POST (RFC 3977 §6.3.1), IHAVE (§6.3.2), and QUIT (§5.4).

use tracing::debug;

use crate::article::Article;
use crate::commands::{self, Command};
use crate::encoder::ArticleEncoder;
use crate::error::{NntpError, Result};
use crate::response::codes;

use super::state::ConnectionState;
use super::NntpClient;

impl NntpClient {
    /// Post a new article (RFC 3977 §6.3.1).
    ///
    /// Servers decide independently of AUTHINFO whether posting is
    /// allowed; this method does not gate on [`NntpClient::is_authenticated`].
    ///
    /// # Errors
    ///
    /// Returns [`NntpError::PostingNotPermitted`] (440) or
    /// [`NntpError::PostingFailed`] (441).
    pub async fn post(&mut self, article: &mut Article) -> Result<()> {
        debug!("POST");
        let resp = self.request(Command::Post, &[]).await?;
        let status = resp.status;
        let status_text = resp.status_text.clone();
        drop(resp);

        if status == codes::POSTING_NOT_PERMITTED {
            return Err(NntpError::PostingNotPermitted);
        }
        if status != codes::SEND_ARTICLE {
            return Err(NntpError::Protocol { status, status_text });
        }

        ArticleEncoder::write(self.reader_mut().get_mut(), article).await?;

        let resp = self.read_response(None).await?;
        let status = resp.status;
        let status_text = resp.status_text.clone();
        drop(resp);

        match status {
            codes::ARTICLE_POSTED => {
                debug!("article posted");
                Ok(())
            }
            codes::POSTING_FAILED => Err(NntpError::PostingFailed(status_text)),
            _ => Err(NntpError::Protocol { status, status_text }),
        }
    }

    /// Offer an article for server-to-server transfer (RFC 3977 §6.3.2).
    ///
    /// # Errors
    ///
    /// Returns [`NntpError::ArticleNotWanted`] (435),
    /// [`NntpError::TransferNotPossible`] (436, retryable), or
    /// [`NntpError::TransferRejected`] (437, permanent).
    pub async fn ihave(&mut self, message_id: &str, article: &mut Article) -> Result<()> {
        debug!("IHAVE {}", message_id);
        let wrapped = commands::wrap_message_id(message_id);
        let resp = self.request(Command::Ihave, &[&wrapped]).await?;
        let status = resp.status;
        let status_text = resp.status_text.clone();
        drop(resp);

        match status {
            codes::ARTICLE_NOT_WANTED => return Err(NntpError::ArticleNotWanted),
            codes::TRANSFER_NOT_POSSIBLE => {
                return Err(NntpError::TransferNotPossible(status_text))
            }
            codes::SEND_ARTICLE_TRANSFER => {}
            _ => return Err(NntpError::Protocol { status, status_text }),
        }

        ArticleEncoder::write(self.reader_mut().get_mut(), article).await?;

        let resp = self.read_response(None).await?;
        let status = resp.status;
        let status_text = resp.status_text.clone();
        drop(resp);

        match status {
            codes::ARTICLE_TRANSFERRED => {
                debug!("article transferred");
                Ok(())
            }
            codes::TRANSFER_NOT_POSSIBLE => Err(NntpError::TransferNotPossible(status_text)),
            codes::TRANSFER_REJECTED => Err(NntpError::TransferRejected(status_text)),
            _ => Err(NntpError::Protocol { status, status_text }),
        }
    }

    /// Close the connection gracefully (RFC 3977 §5.4): sends `QUIT`, reads
    /// the server's acknowledgement, then shuts down the transport via
    /// [`close`](Self::close).
    pub async fn quit(&mut self) -> Result<()> {
        debug!("QUIT");
        let resp = self.request(Command::Quit, &[]).await?;
        drop(resp);
        self.close().await
    }
}
