//! Vault usage aggregation and statistics.
//!
//! This module provides utilities for combining per-vault rows and
//! ordering summary breakdowns for display.

use crate::models::{SummaryEntry, VaultDescription, VaultDisplayRow};
use std::collections::HashMap;

/// Sum file counts and sizes over all rows.
pub fn totals(rows: &[VaultDisplayRow]) -> SummaryEntry {
    rows.iter().fold(SummaryEntry::default(), |acc, row| SummaryEntry {
        count: acc.count.saturating_add(row.file_count),
        size: acc.size.saturating_add(row.total_size),
    })
}

/// Count the vaults that hold anything for the project.
pub fn vaults_with_data(rows: &[VaultDisplayRow]) -> usize {
    rows.iter().filter(|row| row.has_data()).count()
}

/// Order a breakdown map largest size first, ties broken by name.
pub fn sort_breakdown(breakdown: &HashMap<String, SummaryEntry>) -> Vec<(String, SummaryEntry)> {
    let mut entries: Vec<(String, SummaryEntry)> = breakdown
        .iter()
        .map(|(name, entry)| (name.clone(), *entry))
        .collect();

    entries.sort_by(|a, b| b.1.size.cmp(&a.1.size).then_with(|| a.0.cmp(&b.0)));
    entries
}

/// Reverse the catalog so the most recently added vault comes first.
pub fn newest_first(mut vaults: Vec<VaultDescription>) -> Vec<VaultDescription> {
    vaults.reverse();
    vaults
}
