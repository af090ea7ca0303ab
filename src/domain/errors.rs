use std::fmt;

#[derive(Debug, Clone)]
pub enum RelayError {
    Configuration(String),
    Authentication(String),
    InvalidUrl(String),
    SettingNotFound(String),
    SettingsOperation(String),
    Storage(String),
    Upstream(String),
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            RelayError::Authentication(msg) => write!(f, "Authentication failed: {}", msg),
            RelayError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            RelayError::SettingNotFound(id) => write!(f, "Server does not expose setting '{}'", id),
            RelayError::SettingsOperation(msg) => write!(f, "Settings operation failed: {}", msg),
            RelayError::Storage(msg) => write!(f, "Token storage error: {}", msg),
            RelayError::Upstream(msg) => write!(f, "Upstream request failed: {}", msg),
        }
    }
}

impl std::error::Error for RelayError {}

pub type Result<T> = std::result::Result<T, RelayError>;
