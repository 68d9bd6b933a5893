pub mod reports;
pub mod templates;

use crate::forms::error::FormError;
use crate::store::StoreError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use log::warn;
use serde_json::json;

/// HTTP status a failed form operation maps to.
pub fn status_for(err: &FormError) -> StatusCode {
    match err {
        FormError::TemplateNotFound { .. } => StatusCode::NOT_FOUND,
        FormError::DuplicateFieldId { .. } | FormError::InvalidIdentifier { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        FormError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
        FormError::Store(StoreError::VersionConflict { .. }) => StatusCode::CONFLICT,
        FormError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Renders `err` as `{ "error": "..." }` with the status from `status_for`.
pub fn error_response(err: &FormError) -> HttpResponse {
    let status = status_for(err);
    warn!("Request failed ({}): {}", status, err);
    HttpResponse::build(status).json(json!({ "error": err.to_string() }))
}

/// Response for a `web::block` call that never ran to completion.
pub fn blocking_failed(err: actix_web::error::BlockingError) -> HttpResponse {
    warn!("Blocking task failed: {}", err);
    HttpResponse::ServiceUnavailable().json(json!({ "error": err.to_string() }))
}
