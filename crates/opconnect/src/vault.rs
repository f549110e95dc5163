//! Vault resolution.
//!
//! A [`ConnectClient`] starts with an empty [`VaultHandle`]. Resolving a
//! vault by name (or injecting its id) fills the handle; item operations
//! are scoped to it from then on.

use crate::client::ConnectClient;
use crate::document::Vault;
use crate::error::ConnectError;

/// The vault subsequent item calls are scoped to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VaultHandle {
    id: Option<String>,
    name: Option<String>,
}

impl VaultHandle {
    /// Resolved vault id. Fails with [`ConnectError::VaultUnresolved`]
    /// before any successful resolution.
    pub fn id(&self) -> Result<&str, ConnectError> {
        self.id.as_deref().ok_or(ConnectError::VaultUnresolved)
    }

    /// Name the vault was resolved by. `None` when unresolved or when the id
    /// was injected directly.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// `true` once a vault id is held.
    pub fn is_resolved(&self) -> bool {
        self.id.is_some()
    }
}

impl ConnectClient {
    /// List all vaults accessible with the configured token.
    pub async fn list_vaults(&self) -> Result<Vec<Vault>, ConnectError> {
        self.api.get("/vaults").await
    }

    /// Resolve a vault name to its id and scope this client to it.
    ///
    /// The first vault (in server order) whose name matches and which
    /// carries an id wins. On failure the previous handle is left as it was.
    pub async fn resolve_vault(&mut self, name: &str) -> Result<&VaultHandle, ConnectError> {
        let vaults = self.list_vaults().await?;
        let vault = vaults
            .into_iter()
            .filter(|v| v.name() == name)
            .find(|v| {
                if v.id().is_empty() {
                    tracing::warn!(vault = name, "skipping matching vault without an id");
                    return false;
                }
                true
            })
            .ok_or_else(|| ConnectError::NotFound(format!("vault '{name}'")))?;

        tracing::info!(vault = name, vault_id = vault.id(), "resolved vault");
        self.vault = VaultHandle {
            id: Some(vault.id().to_owned()),
            name: Some(name.to_owned()),
        };
        Ok(&self.vault)
    }

    /// Scope this client to a known vault id, bypassing name resolution.
    ///
    /// A blank id is rejected with [`ConnectError::VaultUnresolved`] and the
    /// previous handle is kept.
    pub fn set_vault_id(&mut self, id: impl Into<String>) -> Result<(), ConnectError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ConnectError::VaultUnresolved);
        }
        self.vault = VaultHandle {
            id: Some(id),
            name: None,
        };
        Ok(())
    }

    /// Current vault handle, resolved or not.
    pub fn vault(&self) -> &VaultHandle {
        &self.vault
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (ConnectClient, MockServer) {
        let server = MockServer::start().await;
        let client = ConnectClient::new(ClientConfig::new(server.uri(), "test-token")).unwrap();
        (client, server)
    }

    async fn mount_vaults(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/v1/vaults"))
            .and(header("Authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }

    #[test]
    fn unresolved_handle_fails_fast() {
        let handle = VaultHandle::default();
        assert!(!handle.is_resolved());
        assert!(matches!(handle.id(), Err(ConnectError::VaultUnresolved)));
        assert!(handle.name().is_none());
    }

    #[test]
    fn set_vault_id_resolves_without_name() {
        let config = ClientConfig::new("http://localhost:8080", "t");
        let mut client = ConnectClient::new(config).unwrap();
        client.set_vault_id("v9").unwrap();
        assert_eq!(client.vault().id().unwrap(), "v9");
        assert!(client.vault().name().is_none());
    }

    #[tokio::test]
    async fn list_vaults_returns_server_order() {
        let (client, server) = setup().await;
        mount_vaults(
            &server,
            serde_json::json!([
                {"id": "v1", "name": "Personal", "description": "My vault"},
                {"id": "v2", "name": "Shared"}
            ]),
        )
        .await;

        let vaults = client.list_vaults().await.unwrap();
        assert_eq!(vaults.len(), 2);
        assert_eq!(vaults[0].name(), "Personal");
        assert_eq!(vaults[1].id(), "v2");
    }

    #[tokio::test]
    async fn resolve_vault_by_name() {
        let (mut client, server) = setup().await;
        mount_vaults(
            &server,
            serde_json::json!([
                {"id": "v1", "name": "UIO"},
                {"id": "v2", "name": "Other"}
            ]),
        )
        .await;

        let handle = client.resolve_vault("UIO").await.unwrap();
        assert_eq!(handle.id().unwrap(), "v1");
        assert_eq!(handle.name(), Some("UIO"));
    }

    #[tokio::test]
    async fn resolve_vault_first_match_wins() {
        let (mut client, server) = setup().await;
        mount_vaults(
            &server,
            serde_json::json!([
                {"id": "v1", "name": "Dup"},
                {"id": "v2", "name": "Dup"}
            ]),
        )
        .await;

        client.resolve_vault("Dup").await.unwrap();
        assert_eq!(client.vault().id().unwrap(), "v1");
    }

    #[tokio::test]
    async fn resolve_missing_vault_is_not_found() {
        let (mut client, server) = setup().await;
        mount_vaults(&server, serde_json::json!([{"id": "v2", "name": "Other"}])).await;

        let err = client.resolve_vault("Missing").await.unwrap_err();
        assert!(matches!(err, ConnectError::NotFound(_)));
        assert!(!client.vault().is_resolved());
    }

    #[tokio::test]
    async fn failed_resolution_keeps_previous_handle() {
        let (mut client, server) = setup().await;
        mount_vaults(&server, serde_json::json!([])).await;

        client.set_vault_id("v-known").unwrap();
        assert!(client.resolve_vault("Missing").await.is_err());
        assert_eq!(client.vault().id().unwrap(), "v-known");
    }

    #[test]
    fn blank_vault_id_rejected() {
        let config = ClientConfig::new("http://localhost:8080", "t");
        let mut client = ConnectClient::new(config).unwrap();
        assert!(matches!(client.set_vault_id(""), Err(ConnectError::VaultUnresolved)));
        assert!(matches!(client.set_vault_id("  "), Err(ConnectError::VaultUnresolved)));
        assert!(!client.vault().is_resolved());

        client.set_vault_id("v1").unwrap();
        assert!(client.set_vault_id("").is_err());
        assert_eq!(client.vault().id().unwrap(), "v1");
    }

    #[tokio::test]
    async fn matching_vault_without_id_is_not_found() {
        let (mut client, server) = setup().await;
        mount_vaults(&server, serde_json::json!([{"name": "UIO"}, {"id": 7, "name": "UIO"}])).await;

        let err = client.resolve_vault("UIO").await.unwrap_err();
        assert!(matches!(err, ConnectError::NotFound(_)));
        assert!(!client.vault().is_resolved());
        assert!(matches!(client.items(), Err(ConnectError::VaultUnresolved)));
    }

    #[tokio::test]
    async fn matching_vault_without_id_is_skipped() {
        let (mut client, server) = setup().await;
        mount_vaults(
            &server,
            serde_json::json!([
                {"name": "UIO"},
                {"id": "v2", "name": "UIO"}
            ]),
        )
        .await;

        client.resolve_vault("UIO").await.unwrap();
        assert_eq!(client.vault().id().unwrap(), "v2");
    }

    #[tokio::test]
    async fn resolve_unauthorized_is_http_401() {
        let (mut client, server) = setup().await;
        Mock::given(method("GET"))
            .and(path("/v1/vaults"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let err = client.resolve_vault("UIO").await.unwrap_err();
        assert!(matches!(err, ConnectError::Http { status: 401 }));
        assert!(err.is_unauthorized());
    }
}
