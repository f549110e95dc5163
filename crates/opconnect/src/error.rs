//! Error type shared by every Connect API operation.
//!
//! Raw API error bodies are never carried in an error: a non-success
//! response is reduced to its status code.

/// 1Password Connect API error types.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// Transport-level failure, no response was obtained.
    #[error("connection error communicating with 1Password Connect")]
    Connection(#[source] reqwest::Error),

    /// A response was received with a non-success status.
    #[error("http error: 1Password Connect responded with status {status}")]
    Http { status: u16 },

    /// A success response whose body was not the expected JSON.
    #[error("failed to decode 1Password Connect response")]
    Decode(#[source] reqwest::Error),

    /// Domain-level lookup with no match.
    #[error("no results: {0}")]
    NotFound(String),

    /// An item operation was attempted before a vault was resolved.
    #[error("no vault resolved (resolve a vault by name or set its id first)")]
    VaultUnresolved,

    /// Client settings that cannot be used, such as a missing token.
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl ConnectError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status } => Some(*status),
            _ => None,
        }
    }

    /// `true` for 401 and 403 responses.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// `true` when a caller could reasonably retry the same call.
    ///
    /// Connection failures and 5xx responses qualify. The library itself
    /// never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) => true,
            Self::Http { status } => (500..=599).contains(status),
            _ => false,
        }
    }
}
