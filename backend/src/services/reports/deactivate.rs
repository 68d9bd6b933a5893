use crate::forms::error::FormError;
use crate::services::{blocking_failed, error_response};
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use log::info;

/// Actix web handler for `DELETE /api/reports/{report_id}`. The report is only marked
/// inactive; its document stays in the store.
pub async fn process(report_id: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    let reports = state.reports.clone();
    let report_id = report_id.into_inner();
    let id = report_id.clone();
    match web::block(move || reports.deactivate_report(&id)).await {
        Ok(Ok(())) => {
            info!("Deactivated report {}", report_id);
            HttpResponse::NoContent().finish()
        }
        Ok(Err(e)) => error_response(&FormError::from(e)),
        Err(e) => blocking_failed(e),
    }
}
