//! Structural classification of field definitions and submitted values.
//!
//! Table data reaches the backend without a type tag (columns can be added by the user
//! while filling the form), so values are classified by shape alone. Precedence is fixed:
//! table markers are checked before group markers, and ambiguous input is resolved rather
//! than rejected.

use common::model::field::{FieldDefinition, FieldType};
use serde_json::Value;

/// Keys whose presence on an object makes it a table payload.
pub const TABLE_MARKERS: [&str; 4] = ["columns", "rows", "userAddedColumns", "nextColumnNumber"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Scalar,
    Group,
    Table,
}

pub fn is_table_shaped(value: &Value) -> bool {
    match value {
        Value::Object(map) => TABLE_MARKERS.iter().any(|key| map.contains_key(*key)),
        _ => false,
    }
}

/// Classifies a submitted value. Values are only ever `Table` or `Scalar`; a group's data
/// arrives flattened under its subfield ids.
pub fn classify_value(value: &Value) -> FieldKind {
    if is_table_shaped(value) {
        FieldKind::Table
    } else {
        FieldKind::Scalar
    }
}

/// Classifies a schema definition.
pub fn classify_definition(field: &FieldDefinition) -> FieldKind {
    if field.field_type == FieldType::Table || field.table_spec.is_some() {
        FieldKind::Table
    } else if field.field_type == FieldType::Group || !field.sub_fields.is_empty() {
        FieldKind::Group
    } else {
        FieldKind::Scalar
    }
}
