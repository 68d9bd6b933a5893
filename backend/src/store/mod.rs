//! # Persistence Interfaces
//!
//! The form core and the HTTP services only see these traits; `SqliteStore` is the
//! production implementation and tests substitute in-memory fakes.
//!
//! Every template, common field and report is stored as one JSON document, and every
//! write replaces a whole document in a single statement.

mod sqlite;

pub use sqlite::SqliteStore;

use common::model::field::FieldDefinition;
use common::model::report::{Report, WriteReceipt};
use common::model::template::TemplateDocument;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("malformed stored document: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0} not found")]
    NotFound(String),

    #[error("version conflict: expected {expected}, stored {actual}")]
    VersionConflict { expected: i64, actual: i64 },

    #[error("store lock poisoned")]
    Poisoned,
}

pub trait TemplateStore: Send + Sync {
    fn get_template(
        &self,
        bank_code: &str,
        property_type: &str,
    ) -> Result<Option<TemplateDocument>, StoreError>;

    /// Every stored template, ordered by bank code then property type.
    fn list_templates(&self) -> Result<Vec<TemplateDocument>, StoreError>;

    /// Inserts or replaces the template for its bank code and property type.
    fn save_template(&self, template: &TemplateDocument) -> Result<(), StoreError>;

    /// Active common fields ordered by `sortOrder`.
    fn get_active_common_fields(&self) -> Result<Vec<FieldDefinition>, StoreError>;

    fn save_common_field(&self, field: &FieldDefinition) -> Result<(), StoreError>;
}

pub trait ReportStore: Send + Sync {
    /// Returns active reports only; deactivated ones read as absent.
    fn get_report(&self, report_id: &str) -> Result<Option<Report>, StoreError>;

    /// Writes the whole report and bumps its version. With `expected_version` the write
    /// only applies if the stored version still matches. A deactivated report is never
    /// written to; the call fails with `StoreError::NotFound`.
    fn upsert_report(
        &self,
        report: &Report,
        expected_version: Option<i64>,
    ) -> Result<WriteReceipt, StoreError>;

    /// Soft delete. Reports are never physically removed.
    fn deactivate_report(&self, report_id: &str) -> Result<(), StoreError>;
}
