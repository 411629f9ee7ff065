pub mod dynamodb;
pub mod s3;

use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

use crate::core::DocumentResult;
use crate::models::GeneratedDocument;

/// Lifetime of every download link handed back to callers.
pub const SIGNED_URL_TTL: Duration = Duration::from_secs(3600);

pub use dynamodb::DynamoDbClient;
pub use s3::S3Client;

/// Bucket storage for rendered documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Copies the whole file to `bucket/key`, replacing any existing object.
    async fn upload_file(&self, path: &Path, bucket: &str, key: &str) -> DocumentResult<()>;

    /// GET link for `bucket/key` that stops working after `expires_in`.
    async fn presigned_url(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> DocumentResult<String>;
}

/// Table of generated document records keyed by invoice id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Unconditional put; an existing record with the same id is replaced.
    async fn put_document(&self, document: &GeneratedDocument) -> DocumentResult<()>;
}
