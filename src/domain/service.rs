use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{
    merge_custom_connections, parse_candidate, AuthToken, Credentials, CustomUrlOutcome,
    RelayError, Result,
};
use crate::config::RelayConfig;
use crate::ports::{SettingsPort, TokenIssuerPort, TokenStorePort, TokenValidatorPort};

/// Plex preference id for the manual port mapping.
pub const MANUAL_PORT_SETTING: &str = "manualPortMappingPort";
/// Plex preference id holding the comma-separated custom connections.
pub const CUSTOM_CONNECTIONS_SETTING: &str = "customConnections";

#[derive(Clone)]
pub struct RelayService {
    config: RelayConfig,
    store: Arc<dyn TokenStorePort>,
    validator: Arc<dyn TokenValidatorPort>,
    issuer: Arc<dyn TokenIssuerPort>,
    settings: Arc<dyn SettingsPort>,
}

impl RelayService {
    pub fn new(
        config: RelayConfig,
        store: Arc<dyn TokenStorePort>,
        validator: Arc<dyn TokenValidatorPort>,
        issuer: Arc<dyn TokenIssuerPort>,
        settings: Arc<dyn SettingsPort>,
    ) -> Self {
        Self {
            config,
            store,
            validator,
            issuer,
            settings,
        }
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Overwrite the server's manual port mapping.
    pub async fn change_port(&self, new_port: u16) -> Result<String> {
        self.config.validate()?;
        let token = self.ensure_token().await?;

        let current = self
            .settings
            .read_setting(&self.config.base_url, &token, MANUAL_PORT_SETTING)
            .await?;
        if current.is_none() {
            return Err(RelayError::SettingNotFound(MANUAL_PORT_SETTING.to_string()));
        }

        self.settings
            .apply_setting(
                &self.config.base_url,
                &token,
                MANUAL_PORT_SETTING,
                &new_port.to_string(),
            )
            .await?;

        info!(port = new_port, "manual port mapping updated");
        Ok(format!("manual port mapping changed to {}", new_port))
    }

    /// Merge a candidate URL into the server's custom-connections list.
    pub async fn change_custom_url(&self, raw_url: &str) -> Result<CustomUrlOutcome> {
        self.config.validate()?;
        let candidate = parse_candidate(raw_url)?;
        let token = self.ensure_token().await?;

        let current = self
            .settings
            .read_setting(&self.config.base_url, &token, CUSTOM_CONNECTIONS_SETTING)
            .await?
            .unwrap_or_default();

        let outcome = merge_custom_connections(&current, &candidate);
        self.settings
            .apply_setting(
                &self.config.base_url,
                &token,
                CUSTOM_CONNECTIONS_SETTING,
                &outcome.urls.join(","),
            )
            .await?;

        info!(
            host = %candidate.host,
            port = candidate.port,
            updated = outcome.updated,
            "custom connections updated"
        );
        Ok(outcome)
    }

    /// Produce a token that the Plex server currently accepts.
    ///
    /// Two states only: a cached token that passes the remote probe is used
    /// as-is; anything else (absent, corrupt, or rejected) falls through to a
    /// single sign-in attempt. There is never more than one issue attempt per
    /// request, and a failed issue aborts before any settings call.
    async fn ensure_token(&self) -> Result<AuthToken> {
        if let Some(cached) = self.store.load().await {
            if self.validator.is_valid(&self.config.base_url, &cached).await {
                return Ok(cached);
            }
            debug!("cached token rejected by server, signing in again");
        }

        let credentials =
            Credentials::new(self.config.username.clone(), self.config.password.clone());
        let fresh = self.issuer.issue(&credentials).await?;

        // A fresh token is still usable this request even if it cannot be
        // persisted; the next request will simply sign in again.
        if let Err(err) = self.store.save(&fresh).await {
            warn!("failed to persist fresh token: {}", err);
        }

        Ok(fresh)
    }
}
