use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use std::collections::HashMap;

use super::MetadataStore;
use crate::core::{DocumentError, DocumentResult};
use crate::models::GeneratedDocument;

#[derive(Clone, Debug)]
pub struct DynamoDbClient {
    client: Client,
    table: String,
}

impl DynamoDbClient {
    pub fn new(config: &SdkConfig, table: impl Into<String>) -> Self {
        Self::from_client(Client::new(config), table)
    }

    pub fn from_client(client: Client, table: impl Into<String>) -> Self {
        DynamoDbClient {
            client,
            table: table.into(),
        }
    }
}

/// Item layout: every attribute is a string, keyed by `invoiceId`.
pub fn document_item(document: &GeneratedDocument) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            "invoiceId".to_string(),
            AttributeValue::S(document.invoice_id.clone()),
        ),
        (
            "quoteId".to_string(),
            AttributeValue::S(document.quote_id.clone()),
        ),
        ("type".to_string(), AttributeValue::S(document.doc_type.clone())),
        (
            "pdfKey".to_string(),
            AttributeValue::S(document.storage_key.clone()),
        ),
        (
            "createdAt".to_string(),
            AttributeValue::S(document.created_at_iso()),
        ),
        (
            "status".to_string(),
            AttributeValue::S(document.status.to_string()),
        ),
    ])
}

#[async_trait]
impl MetadataStore for DynamoDbClient {
    #[tracing::instrument(skip(self, document), fields(table = %self.table, invoice_id = %document.invoice_id))]
    async fn put_document(&self, document: &GeneratedDocument) -> DocumentResult<()> {
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(document_item(document)))
            .send()
            .await
            .map_err(|e| DocumentError::MetadataWrite(DisplayErrorContext(&e).to_string()))?;

        tracing::debug!("metadata record stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentStatus;
    use chrono::{TimeZone, Utc};

    #[test]
    fn item_carries_all_record_attributes() {
        let document = GeneratedDocument {
            invoice_id: "id-7".into(),
            quote_id: "Q7".into(),
            doc_type: "estimate".into(),
            storage_key: "estimates/id-7.pdf".into(),
            created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            status: DocumentStatus::Generated,
        };

        let item = document_item(&document);
        let s = |name: &str| item.get(name).and_then(|v| v.as_s().ok()).cloned();

        assert_eq!(item.len(), 6);
        assert_eq!(s("invoiceId").as_deref(), Some("id-7"));
        assert_eq!(s("quoteId").as_deref(), Some("Q7"));
        assert_eq!(s("type").as_deref(), Some("estimate"));
        assert_eq!(s("pdfKey").as_deref(), Some("estimates/id-7.pdf"));
        assert_eq!(s("createdAt").as_deref(), Some("2025-06-01T12:00:00.000000Z"));
        assert_eq!(s("status").as_deref(), Some("generated"));
    }
}
