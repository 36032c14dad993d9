//! Deployment promotion for pagesmith
//!
//! Copies previously generated output into the public deploy root under a
//! stable per-application key and returns the public URL. Application
//! records are reached only through the narrow [`AppRecordStore`] trait;
//! a JSON-file store is provided for standalone use.

mod key;
mod promoter;
mod record;

pub use key::{DEPLOY_KEY_LEN, mint_deploy_key};
pub use pagesmith_utils::error::DeployError;
pub use promoter::DeploymentPromoter;
pub use record::{AppRecord, AppRecordStore, JsonRecordStore};
