use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub description: String,
    #[serde(rename = "unit_cost", alias = "unitCost")]
    pub unit_cost: f64,
    pub quantity: i64,
}

impl InvoiceItem {
    /// Line as it appears on the document, e.g. `2 x Mulch @ $35.50`.
    pub fn line(&self) -> String {
        format!("{} x {} @ ${:.2}", self.quantity, self.description, self.unit_cost)
    }
}

/// Body of `POST /invoices/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
    pub quote_id: String,
    /// Stored verbatim; only `"estimate"` changes the storage prefix.
    #[serde(rename = "type")]
    pub doc_type: String,
    pub customer_name: String,
    pub items: Vec<InvoiceItem>,
}

impl InvoiceRequest {
    pub fn kind(&self) -> DocumentKind {
        DocumentKind::from_type(&self.doc_type)
    }

    pub fn summary(&self) -> String {
        format!(
            "Received request for quote {} with {} items",
            self.quote_id,
            self.items.len()
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceResponse {
    pub invoice_id: String,
    pub message: String,
    #[serde(rename = "signedUrl")]
    pub signed_url: String,
}

/// Storage classification derived from the free-form `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Estimate,
    Invoice,
}

impl DocumentKind {
    /// Anything other than the exact string `"estimate"` is an invoice.
    pub fn from_type(doc_type: &str) -> Self {
        if doc_type == "estimate" {
            DocumentKind::Estimate
        } else {
            DocumentKind::Invoice
        }
    }

    pub fn key_prefix(&self) -> &'static str {
        match self {
            DocumentKind::Estimate => "estimates",
            DocumentKind::Invoice => "invoices",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Estimate => "estimate",
            DocumentKind::Invoice => "invoice",
        }
    }

    pub fn storage_key(&self, invoice_id: &str) -> String {
        format!("{}/{}.pdf", self.key_prefix(), invoice_id)
    }
}
