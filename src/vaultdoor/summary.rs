//! Per-project vault summaries and their fan-out aggregation.

use crate::error::{Result, VaultError};
use crate::models::{VaultDescription, VaultDisplayRow, VaultUsageSummary};
use crate::vaultdoor::client::{VaultTransport, VaultdoorClient};
use futures::future::try_join_all;
use tracing::{debug, error, info};

impl<T: VaultTransport> VaultdoorClient<T> {
    /// Fetch the usage summary of one project in one vault.
    ///
    /// Returns `Ok(None)` when Vaultdoor answers with anything but 200; that
    /// is an expected condition (e.g. the vault holds nothing for the project).
    pub async fn fetch_one_vault_summary(
        &self,
        project_id: &str,
        vault_id: &str,
    ) -> Result<Option<VaultUsageSummary>> {
        let url = self
            .base_url
            .endpoint(&["api", "vault", vault_id, "projectSummary", project_id])?;
        debug!(
            "Checking information about project {} in vault {} at {}",
            project_id, vault_id, self.base_url
        );

        let response = self.transport.get(&url).await?;
        if !response.is_ok() {
            error!(
                "Summary for project {} in vault {} failed with status {}: {}",
                project_id, vault_id, response.status, response.body
            );
            return Ok(None);
        }

        let summary: VaultUsageSummary = serde_json::from_str(&response.body)
            .map_err(|e| VaultError::decode(url.as_str(), e))?;
        Ok(Some(summary))
    }

    /// Fetch summaries for every vault concurrently and normalize them into rows.
    ///
    /// Rows follow the order of `vaults`. Vaults without a summary get a zero
    /// row; any error fails the whole batch.
    pub async fn fetch_all_vault_summaries(
        &self,
        project_id: &str,
        vaults: &[VaultDescription],
    ) -> Result<Vec<VaultDisplayRow>> {
        if vaults.is_empty() {
            return Ok(Vec::new());
        }

        info!(
            "Fetching summaries for project {} from {} vaults",
            project_id,
            vaults.len()
        );

        let summaries = try_join_all(
            vaults
                .iter()
                .map(|vault| self.fetch_one_vault_summary(project_id, &vault.vault_id)),
        )
        .await?;

        let rows: Vec<VaultDisplayRow> = vaults
            .iter()
            .zip(&summaries)
            .map(|(vault, summary)| VaultDisplayRow::from_summary(vault, summary.as_ref()))
            .collect();

        debug!(
            "{} of {} vaults returned a summary",
            summaries.iter().filter(|s| s.is_some()).count(),
            rows.len()
        );

        Ok(rows)
    }
}
