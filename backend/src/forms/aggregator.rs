//! # Schema Aggregation
//!
//! Builds the `AggregatedSchema` served by
//! `GET /api/templates/{bank_code}/{property_type}/aggregated-fields`.
//!
//! ## Merge rules
//!
//! 1.  Common fields come first, restricted to active entries and ordered by `sortOrder`.
//! 2.  Bank tabs follow in the order the template declares them. Sections keep their
//!     declared order; fields inside a section (or directly on a tab) are ordered by
//!     `sortOrder`, ties keeping declaration order.
//! 3.  Group fields carry their subfields inline; these are ordered by their own
//!     `sortOrder`, recursively.
//! 4.  The merged field ids are checked for uniqueness. A collision is returned as
//!     `FormError::DuplicateFieldId` instead of letting one declaration shadow the other.

use crate::forms::error::FormError;
use crate::forms::index::FieldIndex;
use crate::store::TemplateStore;
use common::model::field::FieldDefinition;
use common::model::template::{AggregatedSchema, Section, Tab, TemplateDocument};
use log::{debug, warn};

/// Fetches the template for `(bank_code, property_type)` and the common fields, and merges
/// them.
pub fn aggregate(
    store: &dyn TemplateStore,
    bank_code: &str,
    property_type: &str,
) -> Result<AggregatedSchema, FormError> {
    let template = store
        .get_template(bank_code, property_type)?
        .ok_or_else(|| FormError::TemplateNotFound {
            bank_code: bank_code.to_string(),
            property_type: property_type.to_string(),
        })?;
    let common_fields = store.get_active_common_fields()?;

    build_schema(template, common_fields)
}

/// Pure half of `aggregate`, for callers that already hold the documents.
pub fn build_schema(
    template: TemplateDocument,
    common_fields: Vec<FieldDefinition>,
) -> Result<AggregatedSchema, FormError> {
    let common_fields = sort_fields(
        common_fields
            .into_iter()
            .filter(|field| field.is_active)
            .collect(),
    );

    let bank_specific_tabs: Vec<Tab> = template.tabs.into_iter().map(resolve_tab).collect();

    let schema = AggregatedSchema {
        bank_code: template.bank_code,
        property_type: template.property_type,
        common_fields,
        bank_specific_tabs,
    };

    let index = FieldIndex::build(&schema)?;
    if index.is_empty() {
        warn!(
            "Template {}/{} aggregates to an empty schema",
            schema.bank_code, schema.property_type
        );
    }
    debug!(
        "Aggregated {}/{}: {} field ids across {} tabs",
        schema.bank_code,
        schema.property_type,
        index.len(),
        schema.bank_specific_tabs.len()
    );

    Ok(schema)
}

fn resolve_tab(tab: Tab) -> Tab {
    Tab {
        sections: tab
            .sections
            .into_iter()
            .map(|section| Section {
                fields: sort_fields(section.fields),
                ..section
            })
            .collect(),
        fields: sort_fields(tab.fields),
        ..tab
    }
}

fn sort_fields(fields: Vec<FieldDefinition>) -> Vec<FieldDefinition> {
    let mut fields: Vec<FieldDefinition> = fields.into_iter().map(resolve_field).collect();
    // stable: equal sortOrder keeps declaration order
    fields.sort_by_key(|field| field.sort_order);
    fields
}

fn resolve_field(mut field: FieldDefinition) -> FieldDefinition {
    if !field.sub_fields.is_empty() {
        field.sub_fields = sort_fields(std::mem::take(&mut field.sub_fields));
    }
    field
}
