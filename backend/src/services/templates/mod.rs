//! # Template Service Module
//!
//! Routes under `/api/templates`: reading the aggregated schema a form is rendered from,
//! and storing the documents it is aggregated from.
//!
//! ## Sub-modules:
//! - `get`: builds the aggregated schema for one bank and property type.
//! - `save`: validates and stores bank templates.
//! - `common_fields`: validates and stores entries of the shared common-fields collection.

mod common_fields;
mod get;
mod save;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

/// The base path for all template-related API endpoints.
const API_PATH: &str = "/api/templates";

/// Configures and returns the Actix `Scope` for all template-related routes.
///
/// # Registered Routes:
///
/// *   **`POST /save`**: stores a `TemplateDocument` after checking identifiers and field
///     id uniqueness. Replaces any template for the same bank code and property type.
///
/// *   **`POST /common-fields/save`**: stores one common `FieldDefinition`.
///
/// *   **`GET /{bank_code}/{property_type}/aggregated-fields`**: returns the
///     `AggregatedSchema` (common fields first, then the bank's tabs). `404` when the bank
///     has no template for the property type, `422` when the merged schema declares a
///     field id twice.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/save", post().to(save::process))
        .route("/common-fields/save", post().to(common_fields::process))
        .route(
            "/{bank_code}/{property_type}/aggregated-fields",
            get().to(get::process),
        )
}

#[cfg(test)]
mod tests {
    use crate::forms::fixtures;
    use crate::state::AppState;
    use crate::store::{SqliteStore, TemplateStore};
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use common::model::field::{FieldDefinition, FieldType};
    use common::model::template::AggregatedSchema;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn state_with_common_fields() -> (Arc<SqliteStore>, AppState) {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        for field in fixtures::common_fields() {
            store.save_common_field(&field).unwrap();
        }
        let state = AppState::new(store.clone(), store.clone());
        (store, state)
    }

    fn template_json() -> Value {
        serde_json::to_value(fixtures::template()).unwrap()
    }

    fn common_ids(schema: &AggregatedSchema) -> Vec<&str> {
        schema
            .common_fields
            .iter()
            .map(|f| f.field_id.as_str())
            .collect()
    }

    #[actix_web::test]
    async fn aggregated_fields_put_common_fields_before_tabs() {
        let (store, state) = state_with_common_fields();
        store.save_template(&fixtures::template()).unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(super::configure_routes()),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/templates/SBI/land/aggregated-fields")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        let keys: Vec<&str> = body
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert!(keys.contains(&"commonFields") && keys.contains(&"bankSpecificTabs"));

        let schema: AggregatedSchema = serde_json::from_value(body).unwrap();
        assert_eq!(common_ids(&schema), ["applicant_name", "inspection_date"]);
        assert_eq!(schema.bank_specific_tabs[0].tab_id, "T1");
        assert_eq!(schema.bank_specific_tabs[1].tab_id, "T2");
    }

    #[actix_web::test]
    async fn aggregated_fields_for_missing_template() {
        let (_store, state) = state_with_common_fields();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(super::configure_routes()),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/templates/UBI/flat/aggregated-fields")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("UBI"));
    }

    #[actix_web::test]
    async fn aggregated_fields_with_duplicate_id_is_unprocessable() {
        let (store, state) = state_with_common_fields();
        let mut broken = fixtures::template();
        broken.tabs[1]
            .fields
            .push(FieldDefinition::new("land_area", FieldType::Number, 2));
        // written straight to the store, as a pre-existing bad document would be
        store.save_template(&broken).unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(super::configure_routes()),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/templates/SBI/land/aggregated-fields")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_web::test]
    async fn save_assigns_a_template_id_when_missing() {
        let (store, state) = state_with_common_fields();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(super::configure_routes()),
        )
        .await;

        let mut template = template_json();
        template.as_object_mut().unwrap().remove("templateId");
        let req = test::TestRequest::post()
            .uri("/api/templates/save")
            .set_json(&template)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        let template_id = body["template_id"].as_str().unwrap();
        assert!(!template_id.is_empty());

        let stored = store.get_template("SBI", "land").unwrap().unwrap();
        assert_eq!(stored.template_id, template_id);
    }

    #[actix_web::test]
    async fn save_rejects_invalid_identifier() {
        let (store, state) = state_with_common_fields();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(super::configure_routes()),
        )
        .await;

        let mut template = template_json();
        template["tabs"][0]["tabId"] = json!("property details");
        let req = test::TestRequest::post()
            .uri("/api/templates/save")
            .set_json(&template)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(store.get_template("SBI", "land").unwrap(), None);
    }

    #[actix_web::test]
    async fn save_rejects_tab_field_that_reuses_a_common_field_id() {
        let (store, state) = state_with_common_fields();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(super::configure_routes()),
        )
        .await;

        let mut template = template_json();
        template["tabs"][1]["fields"]
            .as_array_mut()
            .unwrap()
            .push(json!({ "fieldId": "applicant_name", "fieldType": "text", "sortOrder": 2 }));
        let req = test::TestRequest::post()
            .uri("/api/templates/save")
            .set_json(&template)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(store.get_template("SBI", "land").unwrap(), None);

        let req = test::TestRequest::post()
            .uri("/api/templates/save")
            .set_json(template_json())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/api/templates/SBI/land/aggregated-fields")
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn common_field_save_joins_the_aggregated_schema() {
        let (store, state) = state_with_common_fields();
        store.save_template(&fixtures::template()).unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(super::configure_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/templates/common-fields/save")
            .set_json(json!({ "fieldId": "bank_branch", "fieldType": "text", "sortOrder": 0 }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/api/templates/SBI/land/aggregated-fields")
            .to_request();
        let schema: AggregatedSchema = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            common_ids(&schema),
            ["bank_branch", "applicant_name", "inspection_date"]
        );
    }

    #[actix_web::test]
    async fn common_field_save_rejects_an_id_a_template_declares() {
        let (store, state) = state_with_common_fields();
        store.save_template(&fixtures::template()).unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(super::configure_routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/templates/common-fields/save")
            .set_json(json!({ "fieldId": "road_width", "fieldType": "number", "sortOrder": 3 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let ids: Vec<String> = store
            .get_active_common_fields()
            .unwrap()
            .into_iter()
            .map(|f| f.field_id)
            .collect();
        assert_eq!(ids, ["applicant_name", "inspection_date"]);
    }
}
