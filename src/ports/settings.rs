use crate::domain::{AuthToken, Result};
use async_trait::async_trait;

/// Port for the server's preferences API
#[async_trait]
pub trait SettingsPort: Send + Sync {
    /// Read a preference value by id; None when the server does not expose it
    async fn read_setting(
        &self,
        base_url: &str,
        token: &AuthToken,
        id: &str,
    ) -> Result<Option<String>>;

    /// Write a preference value; the write persists server-side immediately
    async fn apply_setting(
        &self,
        base_url: &str,
        token: &AuthToken,
        id: &str,
        value: &str,
    ) -> Result<()>;
}
