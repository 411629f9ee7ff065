#![allow(dead_code)]

use async_trait::async_trait;
use invoice_generator::api::{ApiState, AppConfig, Metrics};
use invoice_generator::{DocumentError, DocumentResult, GeneratedDocument, MetadataStore, ObjectStore};
use lopdf::content::Content;
use lopdf::{Document, Object};
use prometheus::Registry;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

pub const BUCKET: &str = "test-invoices";

/// Object store that keeps uploaded bytes in memory.
#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    pub fail_uploads: bool,
}

impl MemoryObjectStore {
    pub fn failing() -> Self {
        MemoryObjectStore {
            fail_uploads: true,
            ..Default::default()
        }
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(&format!("{}/{}", bucket, key))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload_file(&self, path: &Path, bucket: &str, key: &str) -> DocumentResult<()> {
        if self.fail_uploads {
            return Err(DocumentError::Upload("AccessDenied".into()));
        }
        let bytes = std::fs::read(path).map_err(|e| DocumentError::Upload(e.to_string()))?;
        self.objects
            .lock()
            .unwrap()
            .insert(format!("{}/{}", bucket, key), bytes);
        Ok(())
    }

    async fn presigned_url(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> DocumentResult<String> {
        Ok(format!(
            "https://{}.s3.test/{}?X-Amz-Expires={}",
            bucket,
            key,
            expires_in.as_secs()
        ))
    }
}

/// Metadata table that records every put.
#[derive(Default)]
pub struct MemoryMetadataStore {
    records: Mutex<HashMap<String, GeneratedDocument>>,
    pub fail_writes: bool,
}

impl MemoryMetadataStore {
    pub fn failing() -> Self {
        MemoryMetadataStore {
            fail_writes: true,
            ..Default::default()
        }
    }

    pub fn record(&self, invoice_id: &str) -> Option<GeneratedDocument> {
        self.records.lock().unwrap().get(invoice_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl MetadataStore for MemoryMetadataStore {
    async fn put_document(&self, document: &GeneratedDocument) -> DocumentResult<()> {
        if self.fail_writes {
            return Err(DocumentError::MetadataWrite("ProvisionedThroughputExceeded".into()));
        }
        self.records
            .lock()
            .unwrap()
            .insert(document.invoice_id.clone(), document.clone());
        Ok(())
    }
}

pub struct TestContext {
    pub state: ApiState,
    pub objects: Arc<MemoryObjectStore>,
    pub metadata: Arc<MemoryMetadataStore>,
    pub scratch: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_stores(MemoryObjectStore::default(), MemoryMetadataStore::default())
    }

    pub fn with_stores(objects: MemoryObjectStore, metadata: MemoryMetadataStore) -> Self {
        let scratch = TempDir::new().unwrap();
        let objects = Arc::new(objects);
        let metadata = Arc::new(metadata);
        let config = AppConfig {
            bucket: BUCKET.to_string(),
            temp_dir: scratch.path().to_path_buf(),
            ..AppConfig::default()
        };

        let state = ApiState::with_stores(
            config,
            objects.clone(),
            metadata.clone(),
            Metrics::new(Registry::new()).unwrap(),
        );

        TestContext {
            state,
            objects,
            metadata,
            scratch,
        }
    }

    pub fn scratch_is_empty(&self) -> bool {
        std::fs::read_dir(self.scratch.path()).unwrap().next().is_none()
    }
}

/// Text of every `Tj` operator on the first page, in drawing order.
pub fn pdf_lines(bytes: &[u8]) -> Vec<String> {
    let doc = Document::load_mem(bytes).unwrap();
    let pages = doc.get_pages();
    let page_id = *pages.values().next().unwrap();
    let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();

    content
        .operations
        .iter()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| match op.operands.first() {
            Some(Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        })
        .collect()
}
