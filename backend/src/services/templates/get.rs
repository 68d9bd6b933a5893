use crate::forms::aggregator::aggregate;
use crate::services::{blocking_failed, error_response};
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};

/// Actix web handler for `GET /api/templates/{bank_code}/{property_type}/aggregated-fields`.
///
/// The schema is rebuilt from the store on every call; there is nothing to invalidate
/// when a template or common field changes.
pub async fn process(
    path: web::Path<(String, String)>,
    state: web::Data<AppState>,
) -> impl Responder {
    let (bank_code, property_type) = path.into_inner();
    let templates = state.templates.clone();

    match web::block(move || aggregate(templates.as_ref(), &bank_code, &property_type)).await {
        Ok(Ok(schema)) => HttpResponse::Ok().json(schema),
        Ok(Err(e)) => error_response(&e),
        Err(e) => blocking_failed(e),
    }
}
