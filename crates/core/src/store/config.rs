//! Record store provider selection.

use std::path::PathBuf;

use tillbook_shared::config::{StoreConfig, StoreKind};

use super::error::StoreError;

/// Backing service holding the week files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreProvider {
    /// S3-compatible bucket: AWS S3, Cloudflare R2, MinIO.
    S3 {
        /// S3 endpoint URL.
        endpoint: Option<String>,
        /// Bucket name.
        bucket: String,
        /// Region.
        region: Option<String>,
        /// Access key ID; the ambient credential chain is used when unset.
        access_key_id: Option<String>,
        /// Secret access key.
        secret_access_key: Option<String>,
        /// Key prefix inside the bucket.
        root: String,
    },
    /// Local directory.
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
}

impl StoreProvider {
    /// Local directory provider.
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Builds the provider described by the `store` configuration section.
    ///
    /// # Errors
    ///
    /// Returns an error if an S3 store has no bucket.
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        match config.kind {
            StoreKind::Local => Ok(Self::local_fs(&config.root)),
            StoreKind::S3 => {
                let bucket = config
                    .bucket
                    .clone()
                    .filter(|bucket| !bucket.trim().is_empty())
                    .ok_or_else(|| StoreError::configuration("S3 store requires a bucket"))?;

                Ok(Self::S3 {
                    endpoint: config.endpoint.clone(),
                    bucket,
                    region: config.region.clone(),
                    access_key_id: config.access_key_id.clone(),
                    secret_access_key: config.secret_access_key.clone(),
                    root: config.root.clone(),
                })
            }
        }
    }

    /// Provider name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::LocalFs { .. } => "local",
        }
    }
}
