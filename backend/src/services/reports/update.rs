use crate::services::reports::persist::save_report;
use crate::services::{blocking_failed, error_response};
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::requests::SaveReportRequest;

/// Actix web handler for `PUT /api/reports/{report_id}`.
///
/// Same as create, plus `404` for an unknown, deactivated or foreign report and `409
/// Conflict` when `expected_version` is stale.
pub async fn process(
    state: web::Data<AppState>,
    report_id: web::Path<String>,
    payload: web::Json<SaveReportRequest>,
) -> impl Responder {
    let state = state.get_ref().clone();
    let report_id = report_id.into_inner();
    match web::block(move || save_report(&state, Some(report_id), payload.into_inner())).await {
        Ok(Ok(receipt)) => HttpResponse::Ok().json(receipt),
        Ok(Err(e)) => error_response(&e),
        Err(e) => blocking_failed(e),
    }
}
