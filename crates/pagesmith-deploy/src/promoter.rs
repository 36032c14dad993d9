//! Promotion of generated output into the public deploy root.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use std::fs;
use std::io;
use std::sync::Arc;
use tracing::info;

use pagesmith_codegen::{AppId, OutputLocation};

use crate::key::mint_deploy_key;
use crate::record::AppRecordStore;
use crate::DeployError;

/// Promotes a previously generated application into the deploy root.
///
/// Promotion is idempotent with respect to the deploy key: the first call
/// mints one, every later call reuses it and only refreshes the on-disk
/// copy and the deployment timestamp.
pub struct DeploymentPromoter {
    store: Arc<dyn AppRecordStore>,
    output_root: Utf8PathBuf,
    deploy_root: Utf8PathBuf,
    host: String,
}

impl DeploymentPromoter {
    #[must_use]
    pub fn new(
        store: Arc<dyn AppRecordStore>,
        output_root: impl Into<Utf8PathBuf>,
        deploy_root: impl Into<Utf8PathBuf>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            store,
            output_root: output_root.into(),
            deploy_root: deploy_root.into(),
            host: host.into(),
        }
    }

    /// Promote an application's generated output and return its public URL.
    ///
    /// Sequence: resolve the deploy key (reuse or mint), check the source
    /// directory exists, copy it recursively under the key, persist the key
    /// and timestamp on the application record, build the URL. The copy
    /// replaces prior contents under the key; it is not incremental and not
    /// atomic.
    ///
    /// # Errors
    ///
    /// - `DeployError::AppNotFound` when the record does not exist
    /// - `DeployError::SourceNotFound` when no code was generated yet;
    ///   nothing is copied and no deploy directory is created
    /// - `DeployError::CopyFailed` on I/O failure during the copy; the
    ///   record is left untouched
    /// - `DeployError::RecordUpdate` when the record update fails after a
    ///   successful copy (the copied files are not rolled back)
    pub fn promote(&self, app_id: AppId) -> Result<String, DeployError> {
        let record = self.store.fetch(app_id)?;

        // Reuse the existing key; mint one only on first promotion.
        let deploy_key = match record.deploy_key {
            Some(key) if !key.trim().is_empty() => key,
            _ => mint_deploy_key(),
        };

        let source = OutputLocation::resolve(&self.output_root, record.gen_type, app_id);
        if !source.exists() {
            return Err(DeployError::SourceNotFound {
                path: source.to_string(),
            });
        }

        let dest = self.deploy_root.join(&deploy_key);
        copy_dir_recursive(source.as_path(), &dest).map_err(|e| DeployError::CopyFailed {
            dest: dest.to_string(),
            reason: e.to_string(),
        })?;

        self.store
            .record_deployment(app_id, &deploy_key, Utc::now())
            .map_err(|e| DeployError::RecordUpdate {
                app_id: app_id.get(),
                reason: e.to_string(),
            })?;

        let url = format!("{}/{}/", self.host.trim_end_matches('/'), deploy_key);
        info!(app_id = %app_id, deploy_key = %deploy_key, url = %url, "Application deployed");
        Ok(url)
    }
}

/// Copy the contents of `src` into `dest` recursively, creating `dest` as
/// needed and overwriting files that already exist.
fn copy_dir_recursive(src: &Utf8Path, dest: &Utf8Path) -> io::Result<()> {
    fs::create_dir_all(dest)?;
    for entry in src.read_dir_utf8()? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
