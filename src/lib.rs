pub mod api;
pub mod core;
pub mod models;
pub mod pdf;
pub mod storage;

// Re-export commonly used types
pub use models::{
    DocumentKind, DocumentStatus, GeneratedDocument,
    InvoiceItem, InvoiceRequest, InvoiceResponse,
};

pub use crate::core::{DocumentError, DocumentResult};
pub use pdf::PdfGenerator;
pub use storage::{DynamoDbClient, MetadataStore, ObjectStore, S3Client};
