//! Client configuration.
//!
//! The token is always resolved here, at construction time. Request code
//! only ever sees an [`AccessToken`].

use std::time::Duration;

use crate::error::ConnectError;
use crate::token::AccessToken;

/// Environment variable read by [`TokenSource::from_default_env`].
pub const TOKEN_ENV: &str = "OPASSWORD_ACCESS_TOKEN";

/// Default per-request timeout applied by the transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the bearer token comes from.
#[derive(Debug, Clone)]
pub enum TokenSource {
    /// A token injected directly by the caller.
    Literal(AccessToken),
    /// Name of an environment variable holding the token.
    Env(String),
}

impl TokenSource {
    /// Read the token from `OPASSWORD_ACCESS_TOKEN`.
    pub fn from_default_env() -> Self {
        Self::Env(TOKEN_ENV.to_owned())
    }

    /// Produce the token, failing when it is missing or blank.
    pub fn resolve(&self) -> Result<AccessToken, ConnectError> {
        let token = match self {
            Self::Literal(token) => token.clone(),
            Self::Env(name) => std::env::var(name).map(AccessToken::new).map_err(|_| {
                ConnectError::Config(format!("environment variable {name} is not set"))
            })?,
        };
        if token.is_empty() {
            return Err(ConnectError::Config("access token is empty".into()));
        }
        Ok(token)
    }
}

/// Configuration for a [`ConnectClient`](crate::ConnectClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub token: TokenSource,
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    /// Configuration with an injected token and default timeout.
    pub fn new(endpoint: impl Into<String>, token: impl Into<AccessToken>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: TokenSource::Literal(token.into()),
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
        }
    }

    /// Configuration that reads the token from `OPASSWORD_ACCESS_TOKEN`.
    pub fn from_env(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: TokenSource::from_default_env(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
        }
    }

    pub fn with_token(mut self, token: impl Into<AccessToken>) -> Self {
        self.token = TokenSource::Literal(token.into());
        self
    }

    pub fn with_token_env(mut self, name: impl Into<String>) -> Self {
        self.token = TokenSource::Env(name.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Build the user-agent string from the crate version.
fn default_user_agent() -> String {
    format!("opconnect/{}", env!("CARGO_PKG_VERSION"))
}

/// Validate that an endpoint uses `https://`, allowing `http://` only for
/// localhost. Returns the endpoint with trailing slashes trimmed.
pub(crate) fn normalize_endpoint(url: &str) -> Result<String, ConnectError> {
    let url = url.trim().trim_end_matches('/');
    if url.starts_with("https://") {
        return Ok(url.to_owned());
    }
    if let Some(host_part) = url.strip_prefix("http://") {
        let host = host_part.split('/').next().unwrap_or("");
        let host_no_port = host.split(':').next().unwrap_or("");
        if host_no_port == "localhost" || host_no_port == "127.0.0.1" {
            return Ok(url.to_owned());
        }
        return Err(ConnectError::Config(format!(
            "insecure HTTP endpoint rejected: {url} \
             (http:// is permitted for localhost/127.0.0.1 only)"
        )));
    }
    Err(ConnectError::Config(format!(
        "unsupported endpoint scheme: {url} (expected https://)"
    )))
}
