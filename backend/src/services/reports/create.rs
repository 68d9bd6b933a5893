use crate::services::reports::persist::save_report;
use crate::services::{blocking_failed, error_response};
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::requests::SaveReportRequest;

/// Actix web handler for `POST /api/reports`.
///
/// # Returns
/// - `201 Created` with `{ report_id, version, updated_at }`.
/// - `404 Not Found` when no template exists for the bank and property type.
/// - `422 Unprocessable Entity` when that template declares a field id twice.
pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<SaveReportRequest>,
) -> impl Responder {
    let state = state.get_ref().clone();
    match web::block(move || save_report(&state, None, payload.into_inner())).await {
        Ok(Ok(receipt)) => HttpResponse::Created().json(receipt),
        Ok(Err(e)) => error_response(&e),
        Err(e) => blocking_failed(e),
    }
}
