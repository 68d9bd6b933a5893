use crate::forms::error::FormError;
use crate::forms::extractor::extract;
use crate::services::{blocking_failed, error_response};
use crate::state::AppState;
use crate::store::StoreError;
use actix_web::{web, HttpResponse, Responder};
use common::requests::ReportResponse;

/// Actix web handler for `GET /api/reports/{report_id}`.
pub async fn process(report_id: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    let state = state.get_ref().clone();
    let report_id = report_id.into_inner();
    match web::block(move || get_report(&state, &report_id)).await {
        Ok(Ok(report)) => HttpResponse::Ok().json(report),
        Ok(Err(e)) => error_response(&e),
        Err(e) => blocking_failed(e),
    }
}

/// Loads an active report and flattens its data for the form.
fn get_report(state: &AppState, report_id: &str) -> Result<ReportResponse, FormError> {
    let report = state
        .reports
        .get_report(report_id)?
        .ok_or_else(|| StoreError::NotFound(format!("report {}", report_id)))?;

    Ok(ReportResponse {
        report_data: extract(&report.data),
        report_id: report.report_id,
        organization_id: report.organization_id,
        bank_code: report.bank_code,
        property_type: report.property_type,
        template_id: report.template_id,
        status: report.status,
        version: report.version,
        created_at: report.created_at,
        updated_at: report.updated_at,
    })
}
