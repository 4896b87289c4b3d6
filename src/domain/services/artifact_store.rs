//! Artifact Store
//!
//! Idempotent publication of artifacts under their content digest. An
//! object key is only ever written when a probe reports it absent, so
//! repeated deploys of an unchanged binary transfer nothing.
//!
//! Absence is decided solely by `ControlPlaneError::NotFound`. Any other
//! probe failure propagates as `DeployError::Storage`.

use crate::domain::entities::Artifact;
use crate::domain::ports::{ControlPlaneError, ObjectStore, Packager};
use crate::domain::value_objects::{ContentDigest, StoreLocation};
use crate::error::{DeployError, DeployResult};

/// Result of `ensure_bucket_exists`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BucketStatus {
    Existing(String),
    Created(String),
}

impl BucketStatus {
    pub fn name(&self) -> &str {
        match self {
            BucketStatus::Existing(name) | BucketStatus::Created(name) => name,
        }
    }
}

/// Result of `publish_if_absent`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    pub location: StoreLocation,
    pub uploaded: bool,
}

/// Publishes artifacts into a content-addressed bucket
pub struct ArtifactStore<'a, S: ObjectStore> {
    store: &'a S,
    region: String,
}

impl<'a, S: ObjectStore> ArtifactStore<'a, S> {
    pub fn new(store: &'a S, region: impl Into<String>) -> Self {
        Self {
            store,
            region: region.into(),
        }
    }

    /// Make sure the `<account>-<app>` bucket exists, creating it if absent
    pub fn ensure_bucket_exists(
        &self,
        account_id: &str,
        app_name: &str,
    ) -> DeployResult<BucketStatus> {
        let bucket = StoreLocation::bucket_name(account_id, app_name);
        match self.store.head_bucket(&bucket) {
            Ok(()) => Ok(BucketStatus::Existing(bucket)),
            Err(ControlPlaneError::NotFound) => {
                self.store
                    .create_bucket(&bucket, &self.region)
                    .map_err(|e| DeployError::storage("create-bucket", e))?;
                Ok(BucketStatus::Created(bucket))
            }
            Err(e) => Err(DeployError::storage("head-bucket", e)),
        }
    }

    /// Upload the packaged artifact under `digest` unless it is already there
    pub fn publish_if_absent(
        &self,
        bucket: &str,
        digest: &ContentDigest,
        artifact: &Artifact,
        packager: &dyn Packager,
    ) -> DeployResult<Publication> {
        let location = StoreLocation::new(bucket, digest.clone());
        match self.store.head_object(bucket, digest.as_str()) {
            Ok(()) => {
                return Ok(Publication {
                    location,
                    uploaded: false,
                })
            }
            Err(ControlPlaneError::NotFound) => {}
            Err(e) => return Err(DeployError::storage("head-object", e)),
        }

        let staging = tempfile::tempdir().map_err(|e| DeployError::io(std::env::temp_dir(), e))?;
        let archive = packager.package(artifact, staging.path())?;
        self.store
            .put_object(bucket, digest.as_str(), &archive)
            .map_err(|e| DeployError::storage("put-object", e))?;

        Ok(Publication {
            location,
            uploaded: true,
        })
    }
}
