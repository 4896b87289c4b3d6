//! Artifact bucket operations via `aws s3api`

use std::path::Path;

use super::AwsCli;
use crate::domain::ports::{ControlPlaneResult, ObjectStore};

/// Region whose buckets must not carry a location constraint
const DEFAULT_S3_REGION: &str = "us-east-1";

pub(crate) fn create_bucket_args(bucket: &str, region: &str) -> Vec<String> {
    let mut args = vec![
        "s3api".to_string(),
        "create-bucket".to_string(),
        "--bucket".to_string(),
        bucket.to_string(),
        "--acl".to_string(),
        "private".to_string(),
    ];
    if region != DEFAULT_S3_REGION {
        args.push("--create-bucket-configuration".to_string());
        args.push(format!("LocationConstraint={}", region));
    }
    args
}

impl ObjectStore for AwsCli {
    fn head_bucket(&self, bucket: &str) -> ControlPlaneResult<()> {
        self.run(["s3api", "head-bucket", "--bucket", bucket])
            .map(|_| ())
    }

    fn create_bucket(&self, bucket: &str, region: &str) -> ControlPlaneResult<()> {
        self.run(create_bucket_args(bucket, region)).map(|_| ())
    }

    fn head_object(&self, bucket: &str, key: &str) -> ControlPlaneResult<()> {
        self.run(["s3api", "head-object", "--bucket", bucket, "--key", key])
            .map(|_| ())
    }

    fn put_object(&self, bucket: &str, key: &str, body: &Path) -> ControlPlaneResult<()> {
        let body = body.display().to_string();
        self.run([
            "s3api",
            "put-object",
            "--bucket",
            bucket,
            "--key",
            key,
            "--body",
            body.as_str(),
        ])
        .map(|_| ())
    }
}
