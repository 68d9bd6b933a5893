use crate::model::field::FieldDefinition;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub section_id: String,
    #[serde(default)]
    pub section_name: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

/// A bank-specific tab. Simple banks put fields straight on the tab instead of
/// splitting them into sections; both may be present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub tab_id: String,
    #[serde(default)]
    pub tab_name: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDefinition>,
}

/// Template stored per bank code and property type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDocument {
    #[serde(default)]
    pub template_id: String,
    pub bank_code: String,
    pub property_type: String,
    #[serde(default)]
    pub template_name: String,
    #[serde(default)]
    pub tabs: Vec<Tab>,
}

/// The merged view a form renderer consumes: common fields first, then the bank's tabs.
///
/// Derived on every request, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedSchema {
    pub bank_code: String,
    pub property_type: String,
    pub common_fields: Vec<FieldDefinition>,
    pub bank_specific_tabs: Vec<Tab>,
}
