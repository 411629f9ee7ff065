use actix_web::{web, HttpResponse};
use tracing::Instrument;
use uuid::Uuid;

use super::error::ApiResult;
use super::state::ApiState;
use crate::core::{DocumentError, DocumentResult};
use crate::models::{GeneratedDocument, InvoiceRequest, InvoiceResponse};
use crate::storage::SIGNED_URL_TTL;

/// Render, store and sign an invoice or estimate.
pub async fn generate_invoice(
    body: web::Json<InvoiceRequest>,
    state: web::Data<ApiState>,
) -> ApiResult<HttpResponse> {
    let request = body.into_inner();
    let invoice_id = Uuid::new_v4().to_string();
    let span = tracing::info_span!(
        "generate_invoice",
        invoice_id = %invoice_id,
        quote_id = %request.quote_id,
        doc_type = %request.doc_type,
    );

    match generate_document(&state, invoice_id, request).instrument(span).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => {
            state
                .metrics
                .generation_failures
                .with_label_values(&[e.stage()])
                .inc();
            Err(e.into())
        }
    }
}

/// Runs the pipeline for one request: render, upload, write metadata, sign.
///
/// A failure stops the sequence where it happened. In particular a metadata
/// failure leaves the uploaded object in the bucket with no record pointing at
/// it.
pub async fn generate_document(
    state: &ApiState,
    invoice_id: String,
    request: InvoiceRequest,
) -> DocumentResult<InvoiceResponse> {
    let kind = request.kind();
    let key = kind.storage_key(&invoice_id);
    let bucket = state.config.bucket.as_str();

    tracing::info!(items = request.items.len(), key = %key, "generating document");

    let generator = state.pdf_generator.clone();
    let render_id = invoice_id.clone();
    let render_request = request.clone();
    let scratch = tokio::task::spawn_blocking(move || generator.render(&render_id, &render_request))
        .await
        .map_err(|e| DocumentError::Render(format!("render task failed: {}", e)))
        .and_then(|rendered| rendered)
        .inspect_err(|e| tracing::error!(stage = "render", error = %e, "failed to render PDF"))?;

    state
        .object_store
        .upload_file(&scratch, bucket, &key)
        .await
        .inspect_err(|e| tracing::error!(stage = "upload", error = %e, "failed to upload PDF"))?;

    if let Err(e) = scratch.close() {
        tracing::warn!(error = %e, "failed to remove scratch file");
    }

    let document = GeneratedDocument::new(&invoice_id, &request, &key);
    state
        .metadata_store
        .put_document(&document)
        .await
        .inspect_err(|e| {
            tracing::error!(
                stage = "metadata",
                error = %e,
                orphaned_key = %key,
                "failed to write metadata, uploaded object has no record"
            )
        })?;

    let signed_url = state
        .object_store
        .presigned_url(bucket, &key, SIGNED_URL_TTL)
        .await
        .inspect_err(|e| tracing::error!(stage = "sign", error = %e, "failed to sign URL"))?;

    state
        .metrics
        .documents_generated
        .with_label_values(&[kind.as_str()])
        .inc();
    tracing::info!("document generated");

    Ok(InvoiceResponse {
        message: request.summary(),
        invoice_id,
        signed_url,
    })
}
