use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use std::path::Path;
use std::time::Duration;

use super::ObjectStore;
use crate::core::{DocumentError, DocumentResult};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Clone, Debug)]
pub struct S3Client {
    client: Client,
}

impl S3Client {
    pub fn new(config: &SdkConfig) -> Self {
        Self::from_client(Client::new(config))
    }

    pub fn from_client(client: Client) -> Self {
        S3Client { client }
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    #[tracing::instrument(skip(self))]
    async fn upload_file(&self, path: &Path, bucket: &str, key: &str) -> DocumentResult<()> {
        let body = ByteStream::from_path(path).await.map_err(|e| {
            DocumentError::Upload(format!("failed to read {}: {}", path.display(), e))
        })?;

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .content_type(PDF_CONTENT_TYPE)
            .send()
            .await
            .map_err(|e| DocumentError::Upload(DisplayErrorContext(&e).to_string()))?;

        tracing::debug!("object stored");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn presigned_url(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> DocumentResult<String> {
        let presigning_config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| DocumentError::Upload(e.to_string()))?;

        let presigned = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigning_config)
            .await
            .map_err(|e| DocumentError::Upload(DisplayErrorContext(&e).to_string()))?;

        Ok(presigned.uri().to_string())
    }
}
