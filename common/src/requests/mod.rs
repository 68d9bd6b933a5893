use crate::model::report::{FlatFormData, ReportStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/reports` and `PUT /api/reports/{report_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveReportRequest {
    pub organization_id: String,
    pub bank_code: String,
    pub property_type: String,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub status: Option<ReportStatus>,
    /// Flat field id to value map, exactly as the form holds it.
    #[serde(default)]
    pub report_data: FlatFormData,
    /// When set on an update, the write only goes through if the stored report is still
    /// at this version.
    #[serde(default)]
    pub expected_version: Option<i64>,
}

/// Body returned by `GET /api/reports/{report_id}`: the report's metadata plus its data
/// flattened back into the shape the form was submitted in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse {
    pub report_id: String,
    pub organization_id: String,
    pub bank_code: String,
    pub property_type: String,
    pub template_id: Option<String>,
    pub status: ReportStatus,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub report_data: FlatFormData,
}
