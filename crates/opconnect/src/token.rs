//! Bearer token wrapper with automatic zeroing on drop.
//!
//! `AccessToken` keeps the Connect token in a `Zeroizing<String>`. Debug
//! and Display implementations always show `[REDACTED]`.

use std::fmt;

use zeroize::Zeroizing;

/// A Connect API bearer token that is zeroed from memory on drop.
#[derive(Clone)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    /// Wrap a token, consuming the String.
    pub fn new(token: String) -> Self {
        Self(Zeroizing::new(token))
    }

    /// Access the raw token for the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

impl From<&str> for AccessToken {
    fn from(token: &str) -> Self {
        Self::new(token.to_owned())
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}
