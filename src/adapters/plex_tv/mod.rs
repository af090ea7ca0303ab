use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{AuthToken, Credentials, RelayError, Result};
use crate::ports::TokenIssuerPort;

/// plex.tv sign-in endpoint
pub const PLEX_SIGN_IN_URL: &str = "https://plex.tv/users/sign_in.json";

/// Fixed client identifier sent with every sign-in
const CLIENT_IDENTIFIER: &str = "plexhook";

#[derive(Serialize)]
struct SignInRequest<'a> {
    user: SignInUser<'a>,
}

#[derive(Serialize)]
struct SignInUser<'a> {
    login: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct SignInResponse {
    user: SignInAccount,
}

#[derive(Deserialize)]
struct SignInAccount {
    authentication_token: String,
}

/// Token issuer backed by the plex.tv identity provider.
///
/// This is the only outbound call carrying the account password; error paths
/// report the status code, never the request body.
pub struct PlexTvIssuer {
    client: reqwest::Client,
    sign_in_url: String,
}

impl PlexTvIssuer {
    pub fn new() -> Self {
        Self::with_sign_in_url(PLEX_SIGN_IN_URL)
    }

    /// Point the issuer at an alternate sign-in endpoint (test stubs)
    pub fn with_sign_in_url(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            sign_in_url: url.into(),
        }
    }
}

impl Default for PlexTvIssuer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenIssuerPort for PlexTvIssuer {
    async fn issue(&self, credentials: &Credentials) -> Result<AuthToken> {
        let body = SignInRequest {
            user: SignInUser {
                login: &credentials.username,
                password: &credentials.password,
            },
        };

        debug!(username = %credentials.username, "signing in against {}", self.sign_in_url);

        let response = self
            .client
            .post(&self.sign_in_url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header("X-Plex-Client-Identifier", CLIENT_IDENTIFIER)
            .json(&body)
            .send()
            .await
            .map_err(|e| RelayError::Authentication(format!("sign-in request failed: {}", e)))?;

        if response.status() != StatusCode::CREATED {
            return Err(RelayError::Authentication(format!(
                "sign-in rejected with status {}",
                response.status()
            )));
        }

        let parsed: SignInResponse = response
            .json()
            .await
            .map_err(|e| RelayError::Authentication(format!("malformed sign-in response: {}", e)))?;

        if parsed.user.authentication_token.is_empty() {
            return Err(RelayError::Authentication(
                "sign-in response carried an empty token".to_string(),
            ));
        }

        Ok(AuthToken::new(parsed.user.authentication_token))
    }
}
