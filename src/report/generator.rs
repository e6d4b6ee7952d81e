//! Markdown and JSON report generation.
//!
//! This module renders vault summaries, catalog listings and single-vault
//! breakdowns for the terminal or a file.

use crate::analysis::{sort_breakdown, vaults_with_data};
use crate::models::{
    Breakdown, ReportMetadata, SummaryEntry, SummaryReport, VaultDescription, VaultDisplayRow,
    VaultUsageSummary,
};
use crate::report::size::SizeFormat;
use anyhow::Result;

/// Generate a complete Markdown summary report.
pub fn generate_markdown_report(report: &SummaryReport, sizes: SizeFormat) -> String {
    let mut output = String::new();

    output.push_str("# Vault Summary\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_vault_table(&report.rows, sizes));
    output.push_str(&generate_totals_section(report, sizes));

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str(&format!("- **Project:** {}\n", metadata.project_id));
    section.push_str(&format!("- **Vaultdoor:** {}\n", metadata.vaultdoor_url));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Vaults:** {}\n", metadata.vault_count));
    section.push_str(&format!(
        "- **Fetch Duration:** {:.1}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Generate the per-vault table.
fn generate_vault_table(rows: &[VaultDisplayRow], sizes: SizeFormat) -> String {
    if rows.is_empty() {
        return "No vaults are known to Vaultdoor.\n\n".to_string();
    }

    let mut table = String::new();

    table.push_str("| Vault | Files | Size |\n");
    table.push_str("|:---|---:|---:|\n");
    for row in rows {
        table.push_str(&format!(
            "| {} | {} | {} |\n",
            escape_cell(&row.vault_name),
            row.file_count,
            sizes.format(row.total_size)
        ));
    }
    table.push('\n');

    table
}

/// Generate the totals line.
fn generate_totals_section(report: &SummaryReport, sizes: SizeFormat) -> String {
    if report.rows.is_empty() {
        return String::new();
    }

    format!(
        "**Total:** {} files, {} across {} of {} vaults\n",
        report.totals.count,
        sizes.format(report.totals.size),
        vaults_with_data(&report.rows),
        report.rows.len()
    )
}

/// Generate a JSON report.
pub fn generate_json_report(report: &SummaryReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Generate a Markdown listing of the vault catalog.
pub fn generate_catalog_listing(vaults: &[VaultDescription]) -> String {
    let mut output = String::new();

    output.push_str("# Vaults\n\n");
    if vaults.is_empty() {
        output.push_str("No vaults are known to Vaultdoor.\n");
        return output;
    }

    output.push_str("| Name | Vault ID |\n");
    output.push_str("|:---|:---|\n");
    for vault in vaults {
        output.push_str(&format!(
            "| {} | `{}` |\n",
            escape_cell(&vault.name),
            vault.vault_id
        ));
    }

    output
}

/// Generate a detailed breakdown for one vault.
pub fn generate_breakdown_report(
    project_id: &str,
    vault_id: &str,
    summary: Option<&VaultUsageSummary>,
    sizes: SizeFormat,
) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "# Project {} in vault `{}`\n\n",
        project_id, vault_id
    ));

    let summary = match summary {
        Some(summary) => summary,
        None => {
            output.push_str("No data for this project in this vault.\n");
            return output;
        }
    };

    output.push_str(&format!(
        "**Total:** {} files, {}\n\n",
        summary.total.count,
        sizes.format(summary.total.size)
    ));

    for which in Breakdown::ALL {
        if let Some(map) = summary.breakdown(which) {
            output.push_str(&generate_breakdown_table(which, map, sizes));
        }
    }

    output
}

/// Generate the table for one breakdown map.
fn generate_breakdown_table(
    which: Breakdown,
    map: &std::collections::HashMap<String, SummaryEntry>,
    sizes: SizeFormat,
) -> String {
    let mut section = String::new();

    section.push_str(&format!("## By {}\n\n", which));
    if map.is_empty() {
        section.push_str("*(empty)*\n\n");
        return section;
    }

    section.push_str(&format!("| {} | Files | Size |\n", which));
    section.push_str("|:---|---:|---:|\n");
    for (name, entry) in sort_breakdown(map) {
        section.push_str(&format!(
            "| {} | {} | {} |\n",
            escape_cell(&name),
            entry.count,
            sizes.format(entry.size)
        ));
    }
    section.push('\n');

    section
}

/// Keep pipes in names from breaking table columns.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
