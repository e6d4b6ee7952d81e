//! Error types for Vaultdoor requests.

use thiserror::Error;

/// Result type for Vaultdoor operations
pub type Result<T> = std::result::Result<T, VaultError>;

/// Errors that can occur while talking to Vaultdoor.
///
/// A non-200 status is not an error here: callers decide how to degrade.
/// Only failures that say nothing useful about the data end up in this enum.
#[derive(Debug, Error)]
pub enum VaultError {
    /// The request never produced a response (DNS, connect, reset, timeout)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 200 response whose body does not have the expected shape
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Base URL that cannot be used to build endpoint URLs
    #[error("invalid Vaultdoor URL: {0}")]
    InvalidBaseUrl(String),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl VaultError {
    /// Create a new decode error for a response from `url`
    pub fn decode(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }

    /// Create a new invalid base URL error
    pub fn invalid_base_url(msg: impl Into<String>) -> Self {
        Self::InvalidBaseUrl(msg.into())
    }

    /// Whether this error came from the network layer rather than the payload
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
