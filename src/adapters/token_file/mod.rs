use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{AuthToken, RelayError, Result};
use crate::ports::TokenStorePort;

/// On-disk record, `{"token": "..."}`
#[derive(Debug, Serialize, Deserialize)]
struct TokenRecord {
    token: String,
}

/// Token cache backed by a single JSON file.
///
/// There is no locking around the file: concurrent requests that both find a
/// stale token may race to write a fresh one, and the last writer wins. Both
/// tokens are valid, so the race is benign.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl TokenStorePort for FileTokenStore {
    async fn load(&self) -> Option<AuthToken> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<TokenRecord>(&contents) {
            Ok(record) if !record.token.is_empty() => Some(AuthToken::new(record.token)),
            Ok(_) => None,
            Err(err) => {
                warn!("ignoring corrupt token file {}: {}", self.path.display(), err);
                None
            }
        }
    }

    async fn save(&self, token: &AuthToken) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    RelayError::Storage(format!("creating {}: {}", parent.display(), e))
                })?;
            }
        }

        let record = TokenRecord {
            token: token.as_str().to_string(),
        };
        let contents = serde_json::to_string(&record)
            .map_err(|e| RelayError::Storage(format!("encoding token record: {}", e)))?;
        std::fs::write(&self.path, contents)
            .map_err(|e| RelayError::Storage(format!("writing {}: {}", self.path.display(), e)))
    }
}
