//! Write-time checks for templates and common fields. Aggregation reports duplicate field
//! ids on read; these checks stop new ones from being stored in the first place.

use crate::forms::aggregator::build_schema;
use crate::forms::error::FormError;
use crate::forms::index::FieldIndex;
use common::model::field::FieldDefinition;
use common::model::template::{AggregatedSchema, TemplateDocument};
use regex::Regex;
use std::sync::OnceLock;

fn identifier_re() -> &'static Regex {
    static IDENTIFIER: OnceLock<Regex> = OnceLock::new();
    IDENTIFIER.get_or_init(|| Regex::new(r"^[A-Za-z0-9_\-]+$").expect("static pattern"))
}

pub fn check_identifier(kind: &'static str, value: &str) -> Result<(), FormError> {
    if identifier_re().is_match(value) {
        Ok(())
    } else {
        Err(FormError::InvalidIdentifier {
            kind,
            value: value.to_string(),
        })
    }
}

fn check_field(field: &FieldDefinition) -> Result<(), FormError> {
    check_identifier("field id", &field.field_id)?;
    field.sub_fields.iter().try_for_each(check_field)
}

/// Rejects a template with malformed identifiers, or whose merge with the active common
/// fields would declare a field id twice.
pub fn validate_template(
    template: &TemplateDocument,
    common_fields: &[FieldDefinition],
) -> Result<(), FormError> {
    check_identifier("bank code", &template.bank_code)?;
    check_identifier("property type", &template.property_type)?;

    for tab in &template.tabs {
        check_identifier("tab id", &tab.tab_id)?;
        tab.fields.iter().try_for_each(check_field)?;
        for section in &tab.sections {
            check_identifier("section id", &section.section_id)?;
            section.fields.iter().try_for_each(check_field)?;
        }
    }

    build_schema(template.clone(), common_fields.to_vec()).map(|_| ())
}

/// Rejects a common field whose id, or any subfield id, is malformed, repeated, or already
/// declared by another common field or by a stored template.
///
/// `common_fields` is the stored collection; an entry with the same id is the one being
/// replaced. Conflicts between documents that do not involve `field` are left to
/// aggregation to report.
pub fn validate_common_field(
    field: &FieldDefinition,
    common_fields: &[FieldDefinition],
    templates: &[TemplateDocument],
) -> Result<(), FormError> {
    check_field(field)?;

    let mut merged: Vec<FieldDefinition> = common_fields
        .iter()
        .filter(|existing| existing.field_id != field.field_id)
        .cloned()
        .collect();
    merged.push(field.clone());

    let own_ids = field_ids(field);
    let involves_field = |result: Result<(), FormError>| match result {
        Err(FormError::DuplicateFieldId { ref field_id, .. }) if !own_ids.contains(field_id) => {
            Ok(())
        }
        other => other,
    };

    let schema = AggregatedSchema {
        bank_code: String::new(),
        property_type: String::new(),
        common_fields: merged.clone(),
        bank_specific_tabs: Vec::new(),
    };
    involves_field(FieldIndex::build(&schema).map(|_| ()))?;

    if field.is_active {
        for template in templates {
            involves_field(build_schema(template.clone(), merged.clone()).map(|_| ()))?;
        }
    }
    Ok(())
}

fn field_ids(field: &FieldDefinition) -> Vec<String> {
    let mut ids = vec![field.field_id.clone()];
    for sub_field in &field.sub_fields {
        ids.extend(field_ids(sub_field));
    }
    ids
}
