//! 1Password Connect REST transport.
//!
//! [`ConnectClient`] owns the HTTP client, the bearer token and the
//! resolved vault handle. Every request carries the bearer token and
//! `Accept: application/json`; any non-2xx response is reduced to
//! [`ConnectError::Http`] without exposing its body.

use reqwest::header::{ACCEPT, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::{ClientConfig, normalize_endpoint};
use crate::error::ConnectError;
use crate::token::AccessToken;
use crate::vault::VaultHandle;
use crate::API_VERSION_PATH;

/// 1Password Connect API client.
#[derive(Debug, Clone)]
pub struct ConnectClient {
    pub(crate) api: Api,
    pub(crate) vault: VaultHandle,
}

impl ConnectClient {
    /// Build a client from configuration. The token is resolved here.
    pub fn new(config: ClientConfig) -> Result<Self, ConnectError> {
        let endpoint = normalize_endpoint(&config.endpoint)?;
        let token = config.token.resolve()?;
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConnectError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            api: Api {
                http,
                base_url: format!("{endpoint}{API_VERSION_PATH}"),
                token,
            },
            vault: VaultHandle::default(),
        })
    }

    /// Versioned base URL, e.g. `http://localhost:8080/v1`.
    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }
}

/// Shared request plumbing borrowed by the vault and item clients.
#[derive(Debug, Clone)]
pub(crate) struct Api {
    http: reqwest::Client,
    base_url: String,
    token: AccessToken,
}

impl Api {
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ConnectError> {
        tracing::debug!(method = "GET", path, "sending Connect request");
        let request = self.http.get(self.url(path));
        self.send(request, path).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ConnectError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(method = "POST", path, "sending Connect request");
        let request = self.http.post(self.url(path)).json(body);
        self.send(request, path).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        path: &str,
    ) -> Result<T, ConnectError> {
        let resp = request
            .bearer_auth(self.token.expose())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(ConnectError::Connection)?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(path, status = status.as_u16(), "Connect request failed");
            return Err(ConnectError::Http {
                status: status.as_u16(),
            });
        }
        resp.json::<T>().await.map_err(ConnectError::Decode)
    }
}

/// Percent-encode a single URL path segment.
pub(crate) fn encode_segment(input: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut out = String::with_capacity(input.len());
    for b in input.bytes() {
        let safe = b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~');
        if safe {
            out.push(b as char);
        } else {
            out.push('%');
            out.push(HEX[(b >> 4) as usize] as char);
            out.push(HEX[(b & 0x0F) as usize] as char);
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
