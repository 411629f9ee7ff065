use actix_web::{web, HttpResponse};

use super::error::{ApiError, ApiResult};
use super::handlers;
use super::state::ApiState;
use crate::core::DocumentError;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        .app_data(json_config())

        // Health checks
        .route("/health", web::get().to(health_check))
        .route("/metrics", web::get().to(metrics_endpoint))

        // Document generation
        .service(
            web::scope("/invoices")
                .route("/generate", web::post().to(handlers::generate_invoice))
        );
}

/// Malformed or incomplete bodies are rejected before any side effect.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        tracing::debug!(error = %err, "rejected request body");
        ApiError::from(DocumentError::Validation(err.to_string())).into()
    })
}

/// Liveness only; the backing stores are not contacted.
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok"
    }))
}

async fn metrics_endpoint(state: web::Data<ApiState>) -> ApiResult<HttpResponse> {
    let buffer = state.metrics.encode()?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(buffer))
}
