//! Access to legislative data.
//!
//! The report builder never talks to a database directly; it only needs
//! the three lookups on [`LegislativeStore`]. [`SnapshotStore`] serves them
//! from exported JSON snapshots.

pub mod snapshot;

pub use snapshot::SnapshotStore;

use crate::models::{Bill, Chamber};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a store lookup.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("jurisdiction not found: {0}")]
    JurisdictionNotFound(String),

    #[error("legislative session not found: {jurisdiction} {session}")]
    SessionNotFound {
        jurisdiction: String,
        session: String,
    },

    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to scan snapshot directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Read-only queries the data-quality report needs.
pub trait LegislativeStore {
    /// Sorted, distinct session identifiers for a jurisdiction.
    fn sessions(&self, jurisdiction_id: &str) -> Result<Vec<String>, StoreError>;

    /// The jurisdiction's legislative chambers, in store order.
    fn chambers(&self, jurisdiction_id: &str) -> Result<Vec<Chamber>, StoreError>;

    /// Every bill in one session, with child records loaded.
    fn bills(&self, jurisdiction_id: &str, session: &str) -> Result<Vec<Bill>, StoreError>;
}
