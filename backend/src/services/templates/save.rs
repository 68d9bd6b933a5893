use crate::forms::error::FormError;
use crate::forms::validation::validate_template;
use crate::services::{blocking_failed, error_response};
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::template::TemplateDocument;
use log::info;
use uuid::Uuid;

pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<TemplateDocument>,
) -> impl Responder {
    let state = state.get_ref().clone();
    match web::block(move || save_template(&state, payload.into_inner())).await {
        Ok(Ok(template_id)) => {
            HttpResponse::Ok().json(serde_json::json!({ "template_id": template_id }))
        }
        Ok(Err(e)) => error_response(&e),
        Err(e) => blocking_failed(e),
    }
}

/// Validates `template` against itself and the active common fields, then stores it,
/// assigning a template id when it has none.
pub fn save_template(state: &AppState, mut template: TemplateDocument) -> Result<String, FormError> {
    let common_fields = state.templates.get_active_common_fields()?;
    validate_template(&template, &common_fields)?;

    if template.template_id.trim().is_empty() {
        template.template_id = Uuid::new_v4().to_string();
    }
    state.templates.save_template(&template)?;

    info!(
        "Saved template {} for {}/{} ({} tabs)",
        template.template_id,
        template.bank_code,
        template.property_type,
        template.tabs.len()
    );
    Ok(template.template_id)
}
