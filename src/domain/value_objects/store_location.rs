//! Store Location Value Object
//!
//! Where a published artifact lives: a bucket named from the account and
//! application, and a key equal to the artifact's content digest.

use std::fmt;

use super::ContentDigest;

/// Bucket + key pair for a published artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLocation {
    bucket: String,
    key: ContentDigest,
}

impl StoreLocation {
    pub fn new(bucket: impl Into<String>, key: ContentDigest) -> Self {
        Self {
            bucket: bucket.into(),
            key,
        }
    }

    /// Deterministic bucket name for an (account, app) pair
    ///
    /// S3 bucket names must be lowercase, so the app name is folded and any
    /// character outside `[a-z0-9.-]` becomes `-`.
    pub fn bucket_name(account_id: &str, app_name: &str) -> String {
        let app: String = app_name
            .to_ascii_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        format!("{}-{}", account_id.trim(), app)
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn key(&self) -> &ContentDigest {
        &self.key
    }
}

impl fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_name_joins_account_and_app() {
        assert_eq!(
            StoreLocation::bucket_name("123456789012", "myapp"),
            "123456789012-myapp"
        );
    }

    #[test]
    fn bucket_name_is_lowercase_and_safe() {
        assert_eq!(
            StoreLocation::bucket_name("123456789012", "My_App"),
            "123456789012-my-app"
        );
    }

    #[test]
    fn display_is_s3_uri() {
        let location = StoreLocation::new("123456789012-myapp", ContentDigest::new("abc123"));
        assert_eq!(location.to_string(), "s3://123456789012-myapp/abc123");
    }
}
