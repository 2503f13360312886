//! JSON snapshot backed store.
//!
//! A snapshot is an export of one or more jurisdictions with their
//! organizations, sessions and bills. A store can be opened from a single
//! snapshot file or from a directory of them; jurisdictions appearing in
//! several files are merged.

use super::{LegislativeStore, StoreError};
use crate::models::{Bill, Chamber};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Top-level snapshot document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub jurisdictions: Vec<JurisdictionRecord>,
}

/// A jurisdiction with everything exported for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JurisdictionRecord {
    /// OCD jurisdiction id.
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// All organizations; only legislative chambers are served.
    #[serde(default)]
    pub organizations: Vec<Chamber>,
    #[serde(default)]
    pub sessions: Vec<SessionRecord>,
}

/// One legislative session and its bills.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub identifier: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bills: Vec<Bill>,
}

/// In-memory store built from snapshot files.
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    jurisdictions: Vec<JurisdictionRecord>,
}

impl SnapshotStore {
    /// Open a snapshot file, or every `*.json` file under a directory.
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        let files = snapshot_files(path)?;
        let mut store = Self::default();

        for file in &files {
            let snapshot = read_snapshot(file).await?;
            debug!(
                "Loaded {} jurisdiction(s) from {}",
                snapshot.jurisdictions.len(),
                file.display()
            );
            store.merge(snapshot);
        }

        info!(
            "Opened snapshot store with {} file(s), {} jurisdiction(s)",
            files.len(),
            store.jurisdictions.len()
        );
        Ok(store)
    }

    /// Fold a snapshot into this store.
    pub fn merge(&mut self, snapshot: Snapshot) {
        for incoming in snapshot.jurisdictions {
            match self.jurisdictions.iter_mut().find(|j| j.id == incoming.id) {
                Some(existing) => merge_jurisdiction(existing, incoming),
                None => self.jurisdictions.push(incoming),
            }
        }
    }

    fn jurisdiction(&self, jurisdiction_id: &str) -> Result<&JurisdictionRecord, StoreError> {
        self.jurisdictions
            .iter()
            .find(|j| j.id == jurisdiction_id)
            .ok_or_else(|| StoreError::JurisdictionNotFound(jurisdiction_id.to_string()))
    }
}

impl LegislativeStore for SnapshotStore {
    fn sessions(&self, jurisdiction_id: &str) -> Result<Vec<String>, StoreError> {
        let jurisdiction = self.jurisdiction(jurisdiction_id)?;
        let identifiers: BTreeSet<&str> = jurisdiction
            .sessions
            .iter()
            .map(|s| s.identifier.as_str())
            .collect();

        Ok(identifiers.into_iter().map(String::from).collect())
    }

    fn chambers(&self, jurisdiction_id: &str) -> Result<Vec<Chamber>, StoreError> {
        let jurisdiction = self.jurisdiction(jurisdiction_id)?;

        Ok(jurisdiction
            .organizations
            .iter()
            .filter(|org| org.is_legislative())
            .cloned()
            .collect())
    }

    fn bills(&self, jurisdiction_id: &str, session: &str) -> Result<Vec<Bill>, StoreError> {
        let jurisdiction = self.jurisdiction(jurisdiction_id)?;

        jurisdiction
            .sessions
            .iter()
            .find(|s| s.identifier == session)
            .map(|s| s.bills.clone())
            .ok_or_else(|| StoreError::SessionNotFound {
                jurisdiction: jurisdiction_id.to_string(),
                session: session.to_string(),
            })
    }
}

fn merge_jurisdiction(existing: &mut JurisdictionRecord, incoming: JurisdictionRecord) {
    if existing.name.is_empty() {
        existing.name = incoming.name;
    }

    for org in incoming.organizations {
        if !existing.organizations.iter().any(|o| o.id == org.id) {
            existing.organizations.push(org);
        }
    }

    for session in incoming.sessions {
        match existing
            .sessions
            .iter_mut()
            .find(|s| s.identifier == session.identifier)
        {
            Some(known) => known.bills.extend(session.bills),
            None => existing.sessions.push(session),
        }
    }
}

/// List snapshot files for a path, sorted by name.
fn snapshot_files(path: &Path) -> Result<Vec<PathBuf>, StoreError> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry?;
        let is_json = entry.path().extension().and_then(|e| e.to_str()) == Some("json");

        if entry.file_type().is_file() && is_json {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

async fn read_snapshot(path: &Path) -> Result<Snapshot, StoreError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    serde_json::from_str(&content).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
