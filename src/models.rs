//! Data models for vault summaries.
//!
//! This module contains the wire types returned by the Vaultdoor API and
//! the display-ready projections produced from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// An archival vault known to Vaultdoor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultDescription {
    /// Opaque vault identifier used in API paths.
    pub vault_id: String,
    /// Human-readable vault name.
    pub name: String,
}

/// File count and byte size for one slice of a project's files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub count: u64,
    pub size: u64,
}

/// Usage of one project within one vault, as reported by Vaultdoor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultUsageSummary {
    /// Totals across every file of the project in this vault.
    pub total: SummaryEntry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gnm_type: Option<HashMap<String, SummaryEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<HashMap<String, SummaryEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<HashMap<String, SummaryEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hidden_file: Option<HashMap<String, SummaryEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gnm_project: Option<HashMap<String, SummaryEntry>>,
}

/// The optional per-category breakdowns of a [`VaultUsageSummary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Breakdown {
    GnmType,
    FileType,
    MediaType,
    HiddenFile,
    GnmProject,
}

impl Breakdown {
    /// All breakdowns, in report order.
    pub const ALL: [Breakdown; 5] = [
        Breakdown::MediaType,
        Breakdown::FileType,
        Breakdown::GnmType,
        Breakdown::GnmProject,
        Breakdown::HiddenFile,
    ];
}

impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Breakdown::GnmType => write!(f, "GNM Type"),
            Breakdown::FileType => write!(f, "File Type"),
            Breakdown::MediaType => write!(f, "Media Type"),
            Breakdown::HiddenFile => write!(f, "Hidden File"),
            Breakdown::GnmProject => write!(f, "GNM Project"),
        }
    }
}

impl VaultUsageSummary {
    /// Returns the requested breakdown map, if the service sent one.
    pub fn breakdown(&self, which: Breakdown) -> Option<&HashMap<String, SummaryEntry>> {
        match which {
            Breakdown::GnmType => self.gnm_type.as_ref(),
            Breakdown::FileType => self.file_type.as_ref(),
            Breakdown::MediaType => self.media_type.as_ref(),
            Breakdown::HiddenFile => self.hidden_file.as_ref(),
            Breakdown::GnmProject => self.gnm_project.as_ref(),
        }
    }
}

/// One display row per vault: the normalized projection of a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultDisplayRow {
    pub vault_name: String,
    pub file_count: u64,
    pub total_size: u64,
}

impl VaultDisplayRow {
    /// Builds a row from a vault and its summary; a missing summary gives a zero row.
    pub fn from_summary(vault: &VaultDescription, summary: Option<&VaultUsageSummary>) -> Self {
        match summary {
            Some(summary) => Self {
                vault_name: vault.name.clone(),
                file_count: summary.total.count,
                total_size: summary.total.size,
            },
            None => Self::empty(vault),
        }
    }

    /// A zero-valued row for a vault with no usable summary.
    pub fn empty(vault: &VaultDescription) -> Self {
        Self {
            vault_name: vault.name.clone(),
            file_count: 0,
            total_size: 0,
        }
    }

    /// Whether the vault reported any files for the project.
    pub fn has_data(&self) -> bool {
        self.file_count > 0 || self.total_size > 0
    }
}

/// Metadata about a generated summary report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Vaultdoor base URL the data came from.
    pub vaultdoor_url: String,
    /// Pluto project id the summary is scoped to.
    pub project_id: String,
    /// When the data was fetched.
    pub generated_at: DateTime<Utc>,
    /// Number of vaults in the catalog.
    pub vault_count: usize,
    /// Wall-clock time spent fetching, in seconds.
    pub duration_seconds: f64,
}

/// A project's usage across every known vault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub metadata: ReportMetadata,
    /// One row per vault, in catalog order.
    pub rows: Vec<VaultDisplayRow>,
    /// Sum over all rows.
    pub totals: SummaryEntry,
}
