use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::{AuthToken, RelayError, Result};
use crate::ports::{SettingsPort, TokenValidatorPort};

const TOKEN_PARAM: &str = "X-Plex-Token";

/// Preferences payload, `{"MediaContainer": {"Setting": [...]}}`
#[derive(Debug, Deserialize)]
struct PrefsResponse {
    #[serde(rename = "MediaContainer")]
    media_container: PrefsContainer,
}

#[derive(Debug, Deserialize)]
struct PrefsContainer {
    #[serde(rename = "Setting", default)]
    settings: Vec<PrefSetting>,
}

#[derive(Debug, Deserialize)]
struct PrefSetting {
    id: String,
    #[serde(default)]
    value: Value,
}

/// Plex numbers and booleans come back as JSON scalars; the preferences API
/// takes everything as a string on the way in.
fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn prefs_url(base_url: &str) -> String {
    format!("{}/:/prefs", base_url.trim_end_matches('/'))
}

/// Client for the Plex server itself: the token validation probe and the
/// preferences read/write surface.
pub struct PlexServerClient {
    client: reqwest::Client,
}

impl PlexServerClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for PlexServerClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenValidatorPort for PlexServerClient {
    async fn is_valid(&self, base_url: &str, token: &AuthToken) -> bool {
        let probe = format!("{}/library/sections", base_url.trim_end_matches('/'));
        match self
            .client
            .get(&probe)
            .query(&[(TOKEN_PARAM, token.as_str())])
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                // Fail closed: an unreachable server means the token cannot
                // be trusted for the settings call either.
                debug!("token probe failed: {}", err);
                false
            }
        }
    }
}

#[async_trait]
impl SettingsPort for PlexServerClient {
    async fn read_setting(
        &self,
        base_url: &str,
        token: &AuthToken,
        id: &str,
    ) -> Result<Option<String>> {
        let response = self
            .client
            .get(prefs_url(base_url))
            .header(ACCEPT, "application/json")
            .query(&[(TOKEN_PARAM, token.as_str())])
            .send()
            .await
            .map_err(|e| RelayError::Upstream(format!("preferences read failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(RelayError::Upstream(format!(
                "preferences read failed with status {}",
                response.status()
            )));
        }

        let prefs: PrefsResponse = response
            .json()
            .await
            .map_err(|e| RelayError::Upstream(format!("malformed preferences response: {}", e)))?;

        Ok(prefs
            .media_container
            .settings
            .into_iter()
            .find(|setting| setting.id == id)
            .map(|setting| value_to_string(&setting.value)))
    }

    async fn apply_setting(
        &self,
        base_url: &str,
        token: &AuthToken,
        id: &str,
        value: &str,
    ) -> Result<()> {
        let response = self
            .client
            .put(prefs_url(base_url))
            .query(&[(id, value), (TOKEN_PARAM, token.as_str())])
            .send()
            .await
            .map_err(|e| RelayError::SettingsOperation(format!("writing '{}': {}", id, e)))?;

        if !response.status().is_success() {
            return Err(RelayError::SettingsOperation(format!(
                "server refused '{}' with status {}",
                id,
                response.status()
            )));
        }

        debug!(setting = id, "preference applied");
        Ok(())
    }
}
