use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum LikeButtonError {
    // token
    MissingToken,
    // settlement failures
    NetworkFailure(String),
    ServerRejection(u16, String),
    MalformedResponse(serde_json::Error),
    // markup
    InvalidActionUrl(String),
    InvalidUrl(String),
    MissingAttribute(String, String),
    // bootstrap
    ConfigError(String),
}

impl LikeButtonError {
    /// Errors produced by the request round-trip itself. These leave the button retry-ready.
    pub fn is_settlement_failure(&self) -> bool {
        matches!(
            self,
            LikeButtonError::NetworkFailure(_)
                | LikeButtonError::ServerRejection(_, _)
                | LikeButtonError::MalformedResponse(_)
        )
    }
}

impl fmt::Display for LikeButtonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LikeButtonError::MissingToken => write!(f, "Missing Token: no anti-forgery cookie found"),
            LikeButtonError::NetworkFailure(e) => write!(f, "Network Failure: {}", e),
            LikeButtonError::ServerRejection(status, body) => {
                write!(f, "Server Rejection: status {}: {}", status, body)
            }
            LikeButtonError::MalformedResponse(e) => write!(f, "Malformed Response: {}", e),
            LikeButtonError::InvalidActionUrl(url) => write!(f, "Invalid Action URL: {}", url),
            LikeButtonError::InvalidUrl(e) => write!(f, "Invalid URL: {}", e),
            LikeButtonError::MissingAttribute(attr, element) => {
                write!(f, "Missing Attribute: {} on element {}", attr, element)
            }
            LikeButtonError::ConfigError(e) => write!(f, "Config Error: {}", e),
        }
    }
}

impl Error for LikeButtonError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LikeButtonError::NetworkFailure(_) => None,
            LikeButtonError::MalformedResponse(e) => Some(e),
            LikeButtonError::MissingToken => None,
            LikeButtonError::ServerRejection(_, _) => None,
            LikeButtonError::InvalidActionUrl(_) => None,
            LikeButtonError::InvalidUrl(_) => None,
            LikeButtonError::MissingAttribute(_, _) => None,
            LikeButtonError::ConfigError(_) => None,
        }
    }
}

impl From<reqwest::Error> for LikeButtonError {
    fn from(e: reqwest::Error) -> Self {
        LikeButtonError::NetworkFailure(e.to_string())
    }
}

impl From<serde_json::Error> for LikeButtonError {
    fn from(e: serde_json::Error) -> Self {
        LikeButtonError::MalformedResponse(e)
    }
}

impl From<toml::de::Error> for LikeButtonError {
    fn from(e: toml::de::Error) -> Self {
        LikeButtonError::ConfigError(e.to_string())
    }
}

impl From<std::io::Error> for LikeButtonError {
    fn from(e: std::io::Error) -> Self {
        LikeButtonError::ConfigError(e.to_string())
    }
}
