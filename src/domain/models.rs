use std::fmt;

use url::Url;

use super::{RelayError, Result};

/// Bearer token accepted by the Plex server's administrative API.
///
/// The value is opaque and carries no expiry: staleness is only ever
/// discovered by a failed validation probe.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// The token authenticates every administrative call; keep it out of logs.
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthToken(***)")
    }
}

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// A normalized custom-connection candidate.
///
/// `raw` is the input with a scheme prefixed when none was given; it is what
/// gets appended verbatim when no existing entry matches. `host` and `port`
/// drive the host-keyed lookup, with ports defaulting to 443 for https and
/// 80 otherwise.
#[derive(Debug, Clone)]
pub struct CandidateUrl {
    pub raw: String,
    pub host: String,
    pub port: u16,
}

pub fn parse_candidate(input: &str) -> Result<CandidateUrl> {
    let raw = if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("http://{}", input)
    };

    let parsed =
        Url::parse(&raw).map_err(|e| RelayError::InvalidUrl(format!("{}: {}", input, e)))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| RelayError::InvalidUrl(format!("{}: missing host", input)))?
        .to_string();
    let port = parsed.port_or_known_default().unwrap_or(80);

    Ok(CandidateUrl { raw, host, port })
}

#[derive(Debug, Clone)]
pub struct CustomUrlOutcome {
    pub urls: Vec<String>,
    /// True when an existing entry's port was rewritten in place, false when
    /// the candidate was appended as a new entry.
    pub updated: bool,
}

/// Merge a candidate into the comma-separated custom-connections list.
///
/// Entries are keyed by host, not by full URL: the first entry whose host
/// matches gets its port replaced in place, keeping that entry's scheme and
/// position, and no second entry for the host is added. Scheme and port are
/// deliberately ignored when deciding "same entry".
pub fn merge_custom_connections(current: &str, candidate: &CandidateUrl) -> CustomUrlOutcome {
    let mut urls: Vec<String> = if current.trim().is_empty() {
        Vec::new()
    } else {
        current.split(',').map(str::to_string).collect()
    };

    let mut updated = false;
    for entry in urls.iter_mut() {
        let Ok(parsed) = Url::parse(entry) else {
            continue;
        };
        if parsed.host_str() == Some(candidate.host.as_str()) {
            *entry = format!("{}://{}:{}", parsed.scheme(), candidate.host, candidate.port);
            updated = true;
            break;
        }
    }

    if !updated {
        urls.push(candidate.raw.clone());
    }

    CustomUrlOutcome { urls, updated }
}
