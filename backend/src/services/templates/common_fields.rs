use crate::forms::error::FormError;
use crate::forms::validation::validate_common_field;
use crate::services::{blocking_failed, error_response};
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};
use common::model::field::FieldDefinition;
use log::info;

pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<FieldDefinition>,
) -> impl Responder {
    let state = state.get_ref().clone();
    match web::block(move || save_common_field(&state, &payload)).await {
        Ok(Ok(())) => HttpResponse::Ok().finish(),
        Ok(Err(e)) => error_response(&e),
        Err(e) => blocking_failed(e),
    }
}

fn save_common_field(state: &AppState, field: &FieldDefinition) -> Result<(), FormError> {
    let common_fields = state.templates.get_active_common_fields()?;
    let templates = state.templates.list_templates()?;
    validate_common_field(field, &common_fields, &templates)?;
    state.templates.save_common_field(field)?;
    info!("Saved common field {} (active: {})", field.field_id, field.is_active);
    Ok(())
}
