use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared type of a form field.
///
/// The set of widget types grows with every bank template, so unknown tags are kept
/// as `Other` and written back unchanged instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Text,
    Number,
    Date,
    Select,
    Textarea,
    Checkbox,
    Group,
    Table,
    Other(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Select => "select",
            FieldType::Textarea => "textarea",
            FieldType::Checkbox => "checkbox",
            FieldType::Group => "group",
            FieldType::Table => "table",
            FieldType::Other(tag) => tag,
        }
    }
}

impl From<String> for FieldType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "text" => FieldType::Text,
            "number" => FieldType::Number,
            "date" => FieldType::Date,
            "select" => FieldType::Select,
            "textarea" => FieldType::Textarea,
            "checkbox" => FieldType::Checkbox,
            "group" => FieldType::Group,
            "table" => FieldType::Table,
            _ => FieldType::Other(tag),
        }
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

/// Column/row layout of a table-shaped field, as the form renderer sends it.
///
/// Tables can gain columns while the user fills the report, which is why
/// `user_added_columns` and `next_column_number` live next to the layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_added_columns: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_column_number: Option<Value>,
}

/// A single field of a template or of the common-fields collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Unique within the merged schema of one bank and property type.
    pub field_id: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub ui_display_name: String,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default)]
    pub is_required: bool,
    /// Only meaningful for `FieldType::Group`. Subfields belong to the group and have
    /// no identity outside it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_fields: Vec<FieldDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_spec: Option<TableSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl FieldDefinition {
    pub fn new(field_id: impl Into<String>, field_type: FieldType, sort_order: i64) -> Self {
        let field_id = field_id.into();
        Self {
            ui_display_name: field_id.clone(),
            field_id,
            field_type,
            sort_order,
            is_required: false,
            sub_fields: Vec::new(),
            table_spec: None,
            options: Vec::new(),
            is_active: true,
        }
    }

    pub fn with_sub_fields(mut self, sub_fields: Vec<FieldDefinition>) -> Self {
        self.sub_fields = sub_fields;
        self
    }
}
