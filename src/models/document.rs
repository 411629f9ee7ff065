use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::InvoiceRequest;

/// Metadata record written once per generated document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDocument {
    pub invoice_id: String,
    pub quote_id: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(rename = "pdfKey")]
    pub storage_key: String,
    pub created_at: DateTime<Utc>,
    pub status: DocumentStatus,
}

impl GeneratedDocument {
    pub fn new(invoice_id: &str, request: &InvoiceRequest, storage_key: &str) -> Self {
        GeneratedDocument {
            invoice_id: invoice_id.to_string(),
            quote_id: request.quote_id.clone(),
            doc_type: request.doc_type.clone(),
            storage_key: storage_key.to_string(),
            created_at: Utc::now(),
            status: DocumentStatus::Generated,
        }
    }

    pub fn created_at_iso(&self) -> String {
        iso_timestamp(&self.created_at)
    }
}

/// UTC ISO-8601 with microseconds, e.g. `2025-03-01T09:30:00.123456Z`.
pub fn iso_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Only one state exists; documents are never updated after the write.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Generated,
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentStatus::Generated => write!(f, "generated"),
        }
    }
}
