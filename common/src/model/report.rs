use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Flat form data as the renderer submits it: field id to value.
pub type FlatFormData = Map<String, Value>;

/// Nested layout a report is persisted in.
///
/// `tables` holds every table-shaped value regardless of where the schema declares the
/// field, so large row/column payloads are stored exactly once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    #[serde(default)]
    pub common_fields: Map<String, Value>,
    #[serde(default)]
    pub tabs: BTreeMap<String, Map<String, Value>>,
    #[serde(default)]
    pub tables: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[default]
    Draft,
    Submitted,
}

/// One report document, owned by a single organization and bank template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub report_id: String,
    pub organization_id: String,
    pub bank_code: String,
    pub property_type: String,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub status: ReportStatus,
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Bumped by the store on every write.
    #[serde(default)]
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub data: ReportData,
}

fn default_active() -> bool {
    true
}

/// What the store reports back after an upsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteReceipt {
    pub report_id: String,
    pub version: i64,
    pub updated_at: DateTime<Utc>,
}
