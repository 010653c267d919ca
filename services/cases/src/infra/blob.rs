//! S3-compatible blob store for document bytes.

use std::time::Duration;

use anyhow::Context as _;
use aws_sdk_s3::{
    Client,
    config::{Credentials, Region},
    presigning::PresigningConfig,
    primitives::ByteStream,
};
use bytes::Bytes;

use crate::config::BlobConfig;
use crate::domain::repository::BlobStore;
use crate::error::CasesServiceError;

/// `BlobStore` over any S3-compatible backend (AWS, MinIO, Tigris).
/// Objects live in a single bucket, addressed path-style.
#[derive(Clone)]
pub struct S3BlobStore {
    client: Client,
    endpoint: String,
    bucket: String,
}

impl S3BlobStore {
    pub fn new(config: &BlobConfig) -> Self {
        let creds = Credentials::new(&config.access_key, &config.secret_key, None, None, "env");
        let s3_config = aws_sdk_s3::Config::builder()
            .endpoint_url(&config.endpoint)
            .region(Region::new(config.region.clone()))
            .credentials_provider(creds)
            .force_path_style(true)
            .behavior_version_latest()
            .build();
        Self {
            client: Client::from_conf(s3_config),
            endpoint: config.endpoint.clone(),
            bucket: config.bucket.clone(),
        }
    }

    /// Create the bucket if it does not exist yet. Failures are logged and
    /// swallowed; the first upload will surface a real misconfiguration.
    pub async fn ensure_bucket(&self) {
        let exists = self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok();
        if !exists {
            match self.client.create_bucket().bucket(&self.bucket).send().await {
                Ok(_) => tracing::info!(bucket = %self.bucket, "blob bucket created"),
                Err(e) => {
                    tracing::warn!(error = %e, bucket = %self.bucket, "blob bucket creation failed")
                }
            }
        }
    }
}

impl BlobStore for S3BlobStore {
    async fn upload(
        &self,
        path: &str,
        bytes: Bytes,
        mime_type: &str,
    ) -> Result<String, CasesServiceError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .content_type(mime_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .context("s3 put object")?;
        Ok(format!("{}/{}/{}", self.endpoint, self.bucket, path))
    }

    async fn delete(&self, path: &str) -> Result<(), CasesServiceError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .context("s3 delete object")?;
        Ok(())
    }

    async fn signed_url(
        &self,
        path: &str,
        expires_in: Duration,
    ) -> Result<String, CasesServiceError> {
        let presign = PresigningConfig::builder()
            .expires_in(expires_in)
            .build()
            .context("presigning config")?;
        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(path)
            .presigned(presign)
            .await
            .context("s3 presign get")?;
        Ok(presigned.uri().to_string())
    }
}
