use crate::domain::AuthToken;
use async_trait::async_trait;

/// Port for probing whether the server still accepts a token
#[async_trait]
pub trait TokenValidatorPort: Send + Sync {
    /// True only on an explicit success status from the server; any network
    /// failure or non-success status counts as invalid
    async fn is_valid(&self, base_url: &str, token: &AuthToken) -> bool;
}
