//! Vaultdoor archival service client.
//!
//! This module provides the vault catalog listing and the per-project
//! summary fan-out on top of a pluggable authenticated transport.

pub mod catalog;
pub mod client;
pub mod summary;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{BaseUrl, HttpTransport, TransportOptions, VaultdoorClient};
