//! Application deployment records and the store boundary.
//!
//! Persistent application storage is an external collaborator; this module
//! defines the narrow interface the promoter needs (fetch one record,
//! update its deployment fields) plus a JSON-file implementation for
//! standalone and test use.

use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;

use pagesmith_codegen::{AppId, GenerationType};

use crate::DeployError;

/// The slice of an application record this crate consumes and updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppRecord {
    /// Application identifier
    pub id: AppId,
    /// Which output shape the application was generated with
    pub gen_type: GenerationType,
    /// Stable deployment key; minted on first promotion, never changed
    #[serde(default)]
    pub deploy_key: Option<String>,
    /// Timestamp of the most recent promotion
    #[serde(default)]
    pub deployed_at: Option<DateTime<Utc>>,
}

impl AppRecord {
    /// A record for an application that has never been deployed.
    #[must_use]
    pub fn new(id: AppId, gen_type: GenerationType) -> Self {
        Self {
            id,
            gen_type,
            deploy_key: None,
            deployed_at: None,
        }
    }
}

/// Narrow boundary to the external application store.
pub trait AppRecordStore: Send + Sync {
    /// Fetch one application record.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::AppNotFound` for unknown ids and
    /// `DeployError::Store` for backing-store failures.
    fn fetch(&self, app_id: AppId) -> Result<AppRecord, DeployError>;

    /// Insert or replace an application record.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Store` for backing-store failures.
    fn upsert(&self, record: AppRecord) -> Result<(), DeployError>;

    /// Record a completed promotion: set the deploy key (idempotent after
    /// first mint) and refresh the deployment timestamp.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::AppNotFound` for unknown ids and
    /// `DeployError::Store` for backing-store failures.
    fn record_deployment(
        &self,
        app_id: AppId,
        deploy_key: &str,
        deployed_at: DateTime<Utc>,
    ) -> Result<(), DeployError>;
}

/// Application records persisted as one JSON document on disk.
///
/// Read-modify-write with no locking, in line with the pipeline's
/// last-writer-wins policy for shared filesystem state.
pub struct JsonRecordStore {
    path: Utf8PathBuf,
}

impl JsonRecordStore {
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<BTreeMap<u64, AppRecord>, DeployError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| DeployError::Store(format!("read {}: {e}", self.path)))?;
        serde_json::from_str(&raw)
            .map_err(|e| DeployError::Store(format!("decode {}: {e}", self.path)))
    }

    fn persist(&self, records: &BTreeMap<u64, AppRecord>) -> Result<(), DeployError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| DeployError::Store(format!("create {parent}: {e}")))?;
        }
        let raw = serde_json::to_string_pretty(records)
            .map_err(|e| DeployError::Store(format!("encode records: {e}")))?;
        fs::write(&self.path, raw)
            .map_err(|e| DeployError::Store(format!("write {}: {e}", self.path)))
    }
}

impl AppRecordStore for JsonRecordStore {
    fn fetch(&self, app_id: AppId) -> Result<AppRecord, DeployError> {
        self.load()?
            .remove(&app_id.get())
            .ok_or(DeployError::AppNotFound {
                app_id: app_id.get(),
            })
    }

    fn upsert(&self, record: AppRecord) -> Result<(), DeployError> {
        let mut records = self.load()?;
        records.insert(record.id.get(), record);
        self.persist(&records)
    }

    fn record_deployment(
        &self,
        app_id: AppId,
        deploy_key: &str,
        deployed_at: DateTime<Utc>,
    ) -> Result<(), DeployError> {
        let mut records = self.load()?;
        let record = records
            .get_mut(&app_id.get())
            .ok_or(DeployError::AppNotFound {
                app_id: app_id.get(),
            })?;
        record.deploy_key = Some(deploy_key.to_string());
        record.deployed_at = Some(deployed_at);
        self.persist(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> JsonRecordStore {
        let path = Utf8PathBuf::from_path_buf(dir.path().join("apps.json")).unwrap();
        JsonRecordStore::new(path)
    }

    #[test]
    fn fetch_unknown_app_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        match store.fetch(AppId::new(404)) {
            Err(DeployError::AppNotFound { app_id }) => assert_eq!(app_id, 404),
            other => panic!("Expected AppNotFound, got {other:?}"),
        }
    }

    #[test]
    fn upsert_then_fetch_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store
            .upsert(AppRecord::new(AppId::new(1), GenerationType::MultiFile))
            .unwrap();
        let record = store.fetch(AppId::new(1)).unwrap();
        assert_eq!(record.gen_type, GenerationType::MultiFile);
        assert!(record.deploy_key.is_none());
        assert!(record.deployed_at.is_none());
    }

    #[test]
    fn record_deployment_updates_key_and_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store
            .upsert(AppRecord::new(AppId::new(2), GenerationType::Html))
            .unwrap();
        let now = Utc::now();
        store.record_deployment(AppId::new(2), "aB3xY9", now).unwrap();

        let record = store.fetch(AppId::new(2)).unwrap();
        assert_eq!(record.deploy_key.as_deref(), Some("aB3xY9"));
        let fetched = record.deployed_at.expect("timestamp recorded");
        assert_eq!(fetched.timestamp_millis(), now.timestamp_millis());
    }

    #[test]
    fn record_deployment_for_unknown_app_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let result = store.record_deployment(AppId::new(3), "k3y000", Utc::now());
        assert!(matches!(result, Err(DeployError::AppNotFound { .. })));
    }
}
