use crate::domain::{AuthToken, Result};
use async_trait::async_trait;

/// Port for the persisted token cache
#[async_trait]
pub trait TokenStorePort: Send + Sync {
    /// Read the cached token
    ///
    /// Returns None when no usable token is cached; a missing or corrupt
    /// record is indistinguishable from an absent one for callers
    async fn load(&self) -> Option<AuthToken>;

    /// Persist a freshly issued token, replacing any previous one
    async fn save(&self, token: &AuthToken) -> Result<()>;
}
