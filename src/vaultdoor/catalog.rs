//! Vault catalog listing.

use crate::error::{Result, VaultError};
use crate::models::VaultDescription;
use crate::vaultdoor::client::{VaultTransport, VaultdoorClient};
use serde_json::Value;
use tracing::{debug, error, info, warn};

impl<T: VaultTransport> VaultdoorClient<T> {
    /// Fetch every vault Vaultdoor knows about.
    ///
    /// A non-200 status or a payload that is not a JSON array degrades to an
    /// empty list, since "no vaults" is a valid state to display. Transport
    /// failures and unparseable JSON are returned as errors.
    pub async fn list_vaults(&self) -> Result<Vec<VaultDescription>> {
        let url = self.base_url.endpoint(&["api", "vault"])?;
        debug!("Listing vaults at {}", url);

        let response = self.transport.get(&url).await?;
        if !response.is_ok() {
            error!(
                "Vault listing failed with status {}: {}",
                response.status, response.body
            );
            return Ok(Vec::new());
        }

        let content: Value = serde_json::from_str(&response.body)
            .map_err(|e| VaultError::decode(url.as_str(), e))?;

        if !content.is_array() {
            warn!("Expected vault listing to be an array, got {}", content);
            return Ok(Vec::new());
        }

        let vaults: Vec<VaultDescription> =
            serde_json::from_value(content).map_err(|e| VaultError::decode(url.as_str(), e))?;

        info!("Found {} vaults", vaults.len());
        Ok(vaults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vaultdoor::testing::{FakeReply, FakeTransport};
    use crate::vaultdoor::BaseUrl;
    use tokio_test::{assert_err, assert_ok};

    const LIST_URL: &str = "https://vaultdoor-server/api/vault";

    fn client(transport: FakeTransport) -> VaultdoorClient<FakeTransport> {
        VaultdoorClient::new(
            transport,
            BaseUrl::parse("https://vaultdoor-server/").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_lists_vaults() {
        let body = r#"[{"vaultId":"vault-id-one","name":"Vault one"},{"vaultId":"vault-id-two","name":"Vault two"}]"#;
        let client = client(FakeTransport::new().route(LIST_URL, FakeReply::ok(body)));

        let vaults = assert_ok!(client.list_vaults().await);
        assert_eq!(vaults.len(), 2);
        assert_eq!(vaults[0].vault_id, "vault-id-one");
        assert_eq!(vaults[1].name, "Vault two");
        assert_eq!(client.transport.calls(), vec![LIST_URL.to_string()]);
    }

    #[tokio::test]
    async fn test_non_array_payload_is_empty() {
        let body = r#"{"status":"ok","entries":[]}"#;
        let client = client(FakeTransport::new().route(LIST_URL, FakeReply::ok(body)));

        let vaults = assert_ok!(client.list_vaults().await);
        assert!(vaults.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_is_empty() {
        let body = r#"{"status":"error","detail":"kaboom"}"#;
        let client = client(FakeTransport::new().route(LIST_URL, FakeReply::status(500, body)));

        let vaults = assert_ok!(client.list_vaults().await);
        assert!(vaults.is_empty());
        assert_eq!(client.transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_json_is_error() {
        let client = client(FakeTransport::new().route(LIST_URL, FakeReply::ok("<html>")));

        let err = assert_err!(client.list_vaults().await);
        assert!(matches!(err, VaultError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let client = client(FakeTransport::new().route(LIST_URL, FakeReply::Unreachable));

        let err = assert_err!(client.list_vaults().await);
        assert!(err.is_transport());
    }
}
