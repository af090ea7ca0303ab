use crate::domain::{AuthToken, Credentials, Result};
use async_trait::async_trait;

/// Port for the plex.tv sign-in exchange
#[async_trait]
pub trait TokenIssuerPort: Send + Sync {
    /// Exchange account credentials for a fresh token
    ///
    /// Fails without a partial credential on any non-created status,
    /// transport error, or malformed response body
    async fn issue(&self, credentials: &Credentials) -> Result<AuthToken>;
}
