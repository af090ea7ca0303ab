use std::env;

use crate::domain::{RelayError, Result};

pub const USERNAME_VAR: &str = "PLEX_USERNAME";
pub const PASSWORD_VAR: &str = "PLEX_PASSWORD";
pub const BASE_URL_VAR: &str = "PLEX_URL";

/// Relay configuration, read once from the environment at startup and
/// immutable afterwards. Validation is deliberately lazy: every inbound
/// request re-checks completeness so that a misconfigured deployment keeps
/// serving explicit configuration errors instead of crashing at boot.
#[derive(Debug, Clone, Default)]
pub struct RelayConfig {
    pub username: String,
    pub password: String,
    pub base_url: String,
}

impl RelayConfig {
    pub fn from_env() -> Self {
        Self {
            username: env::var(USERNAME_VAR).unwrap_or_default(),
            password: env::var(PASSWORD_VAR).unwrap_or_default(),
            base_url: env::var(BASE_URL_VAR).unwrap_or_default(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing_vars().is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_vars();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(RelayError::Configuration(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )))
        }
    }

    fn missing_vars(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.username.is_empty() {
            missing.push(USERNAME_VAR);
        }
        if self.password.is_empty() {
            missing.push(PASSWORD_VAR);
        }
        if self.base_url.is_empty() {
            missing.push(BASE_URL_VAR);
        }
        missing
    }
}
