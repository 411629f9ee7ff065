use thiserror::Error;

/// Failures of the generation pipeline, one per stage.
///
/// Every variant is fatal for the request that produced it. Nothing that
/// already happened in an earlier stage is undone.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("render error: {0}")]
    Render(String),

    /// Covers both the object write and issuing the signed URL.
    #[error("upload error: {0}")]
    Upload(String),

    /// The object is already in the bucket when this happens and stays there
    /// without a metadata record.
    #[error("metadata write error: {0}")]
    MetadataWrite(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl DocumentError {
    /// Stage label used in logs and metrics.
    pub fn stage(&self) -> &'static str {
        match self {
            DocumentError::Validation(_) => "validation",
            DocumentError::Render(_) => "render",
            DocumentError::Upload(_) => "upload",
            DocumentError::MetadataWrite(_) => "metadata",
            DocumentError::Config(_) => "config",
        }
    }
}

impl From<std::io::Error> for DocumentError {
    fn from(error: std::io::Error) -> Self {
        DocumentError::Render(error.to_string())
    }
}

impl From<lopdf::Error> for DocumentError {
    fn from(error: lopdf::Error) -> Self {
        DocumentError::Render(error.to_string())
    }
}

pub type DocumentResult<T> = Result<T, DocumentError>;
