//! AUTHINFO USER/PASS authentication (RFC 4643 §2.3).

use tracing::debug;

use super::state::ConnectionState;
use super::NntpClient;
use crate::commands::Command;
use crate::error::{NntpError, Result};
use crate::response::codes;

impl NntpClient {
    /// Authenticate with a username and password.
    ///
    /// Sends `AUTHINFO USER`, then `AUTHINFO PASS` if the server requests
    /// it with a 381 continuation. A no-op if the connection is already
    /// authenticated.
    ///
    /// # Errors
    ///
    /// Returns [`NntpError::AuthFailed`] on 481 (rejected) or 482
    /// (out-of-sequence), or any other unexpected status.
    pub async fn authinfo(&mut self, user: &str, pass: &str) -> Result<()> {
        if matches!(self.state, ConnectionState::Authenticated) {
            return Ok(());
        }

        debug!("sending AUTHINFO USER");
        let resp = self.request(Command::AuthinfoUser, &[user]).await?;
        let status = resp.status;
        let status_text = resp.status_text.clone();
        drop(resp);

        match status {
            codes::AUTH_ACCEPTED => {
                self.state = ConnectionState::Authenticated;
                debug!("authenticated without password");
                return Ok(());
            }
            codes::AUTH_CONTINUE => {
                self.state = ConnectionState::InProgress;
            }
            codes::AUTH_REJECTED | codes::AUTH_OUT_OF_SEQUENCE => {
                self.state = ConnectionState::Ready;
                return Err(NntpError::AuthFailed(status_text));
            }
            codes::ENCRYPTION_REQUIRED => {
                self.state = ConnectionState::Ready;
                return Err(NntpError::EncryptionRequired(status_text));
            }
            _ => {
                self.state = ConnectionState::Ready;
                return Err(NntpError::Protocol { status, status_text });
            }
        }

        debug!("sending AUTHINFO PASS");
        let resp = self.request(Command::AuthinfoPass, &[pass]).await?;
        let status = resp.status;
        let status_text = resp.status_text.clone();
        drop(resp);

        match status {
            codes::AUTH_ACCEPTED => {
                self.state = ConnectionState::Authenticated;
                debug!("authentication successful");
                Ok(())
            }
            codes::ENCRYPTION_REQUIRED => {
                self.state = ConnectionState::Ready;
                Err(NntpError::EncryptionRequired(status_text))
            }
            _ => {
                self.state = ConnectionState::Ready;
                Err(NntpError::AuthFailed(status_text))
            }
        }
    }
}
