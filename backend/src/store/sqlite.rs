use crate::store::{ReportStore, StoreError, TemplateStore};
use chrono::{DateTime, Utc};
use common::model::field::FieldDefinition;
use common::model::report::{Report, ReportData, ReportStatus, WriteReceipt};
use common::model::template::TemplateDocument;
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS templates (
    bank_code     TEXT NOT NULL,
    property_type TEXT NOT NULL,
    template_id   TEXT NOT NULL,
    document      TEXT NOT NULL,
    PRIMARY KEY (bank_code, property_type)
);
CREATE TABLE IF NOT EXISTS common_fields (
    field_id   TEXT PRIMARY KEY,
    sort_order INTEGER NOT NULL,
    is_active  INTEGER NOT NULL,
    document   TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS reports (
    report_id       TEXT PRIMARY KEY,
    organization_id TEXT NOT NULL,
    bank_code       TEXT NOT NULL,
    property_type   TEXT NOT NULL,
    template_id     TEXT,
    status          TEXT NOT NULL,
    is_active       INTEGER NOT NULL DEFAULT 1,
    version         INTEGER NOT NULL,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL,
    data            TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_reports_organization ON reports (organization_id);
";

const REPORT_COLUMNS: &str = "report_id, organization_id, bank_code, property_type, template_id, \
     status, is_active, version, created_at, updated_at, data";

/// SQLite-backed document store for templates, common fields and reports.
///
/// `rusqlite::Connection` is not `Sync`, so the connection sits behind a mutex; callers
/// run these methods on the blocking pool.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let store = Self::init(Connection::open(path)?)?;
        info!("Document store opened at {}", path.display());
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

fn status_tag(status: ReportStatus) -> &'static str {
    match status {
        ReportStatus::Draft => "draft",
        ReportStatus::Submitted => "submitted",
    }
}

fn parse_status(tag: &str) -> ReportStatus {
    match tag {
        "submitted" => ReportStatus::Submitted,
        _ => ReportStatus::Draft,
    }
}

/// Raw column values of one `reports` row; the JSON document is decoded afterwards so a
/// malformed document surfaces as `StoreError::Serde` rather than a SQLite error.
struct ReportRow {
    report_id: String,
    organization_id: String,
    bank_code: String,
    property_type: String,
    template_id: Option<String>,
    status: String,
    is_active: bool,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    data: String,
}

impl ReportRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            report_id: row.get(0)?,
            organization_id: row.get(1)?,
            bank_code: row.get(2)?,
            property_type: row.get(3)?,
            template_id: row.get(4)?,
            status: row.get(5)?,
            is_active: row.get(6)?,
            version: row.get(7)?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
            data: row.get(10)?,
        })
    }

    fn into_report(self) -> Result<Report, StoreError> {
        let data: ReportData = serde_json::from_str(&self.data)?;
        Ok(Report {
            report_id: self.report_id,
            organization_id: self.organization_id,
            bank_code: self.bank_code,
            property_type: self.property_type,
            template_id: self.template_id,
            status: parse_status(&self.status),
            is_active: self.is_active,
            version: self.version,
            created_at: self.created_at,
            updated_at: self.updated_at,
            data,
        })
    }
}

impl TemplateStore for SqliteStore {
    fn get_template(
        &self,
        bank_code: &str,
        property_type: &str,
    ) -> Result<Option<TemplateDocument>, StoreError> {
        let conn = self.lock()?;
        let document: Option<String> = conn
            .query_row(
                "SELECT document FROM templates WHERE bank_code = ?1 AND property_type = ?2",
                params![bank_code, property_type],
                |row| row.get(0),
            )
            .optional()?;

        match document {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn list_templates(&self) -> Result<Vec<TemplateDocument>, StoreError> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT document FROM templates ORDER BY bank_code, property_type")?;
        let documents = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        documents
            .iter()
            .map(|json| serde_json::from_str(json).map_err(StoreError::from))
            .collect()
    }

    fn save_template(&self, template: &TemplateDocument) -> Result<(), StoreError> {
        let document = serde_json::to_string(template)?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO templates (bank_code, property_type, template_id, document)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                &template.bank_code,
                &template.property_type,
                &template.template_id,
                document
            ],
        )?;
        Ok(())
    }

    fn get_active_common_fields(&self) -> Result<Vec<FieldDefinition>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT document FROM common_fields WHERE is_active = 1 ORDER BY sort_order, field_id",
        )?;
        let documents = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        documents
            .iter()
            .map(|json| serde_json::from_str(json).map_err(StoreError::from))
            .collect()
    }

    fn save_common_field(&self, field: &FieldDefinition) -> Result<(), StoreError> {
        let document = serde_json::to_string(field)?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO common_fields (field_id, sort_order, is_active, document)
             VALUES (?1, ?2, ?3, ?4)",
            params![&field.field_id, field.sort_order, field.is_active, document],
        )?;
        Ok(())
    }
}

impl ReportStore for SqliteStore {
    fn get_report(&self, report_id: &str) -> Result<Option<Report>, StoreError> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                &format!(
                    "SELECT {} FROM reports WHERE report_id = ?1 AND is_active = 1",
                    REPORT_COLUMNS
                ),
                params![report_id],
                ReportRow::from_row,
            )
            .optional()?;

        row.map(ReportRow::into_report).transpose()
    }

    fn upsert_report(
        &self,
        report: &Report,
        expected_version: Option<i64>,
    ) -> Result<WriteReceipt, StoreError> {
        let data = serde_json::to_string(&report.data)?;
        let now = Utc::now();
        let conn = self.lock()?;

        let written: Option<(i64, DateTime<Utc>)> = match expected_version {
            Some(expected) => conn
                .query_row(
                    "UPDATE reports SET organization_id = ?2, bank_code = ?3, property_type = ?4,
                         template_id = ?5, status = ?6, data = ?7, updated_at = ?8,
                         version = version + 1
                     WHERE report_id = ?1 AND is_active = 1 AND version = ?9
                     RETURNING version, updated_at",
                    params![
                        &report.report_id,
                        &report.organization_id,
                        &report.bank_code,
                        &report.property_type,
                        &report.template_id,
                        status_tag(report.status),
                        data,
                        now,
                        expected
                    ],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?,
            None => conn
                .query_row(
                    "INSERT INTO reports (report_id, organization_id, bank_code, property_type,
                         template_id, status, is_active, version, created_at, updated_at, data)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, 1, ?7, ?8, ?9)
                     ON CONFLICT (report_id) DO UPDATE SET
                         organization_id = excluded.organization_id,
                         bank_code = excluded.bank_code,
                         property_type = excluded.property_type,
                         template_id = excluded.template_id,
                         status = excluded.status,
                         data = excluded.data,
                         updated_at = excluded.updated_at,
                         version = reports.version + 1
                     WHERE reports.is_active = 1
                     RETURNING version, updated_at",
                    params![
                        &report.report_id,
                        &report.organization_id,
                        &report.bank_code,
                        &report.property_type,
                        &report.template_id,
                        status_tag(report.status),
                        report.created_at,
                        now,
                        data
                    ],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?,
        };

        match (written, expected_version) {
            (Some((version, updated_at)), _) => Ok(WriteReceipt {
                report_id: report.report_id.clone(),
                version,
                updated_at,
            }),
            (None, Some(expected)) => {
                let actual: Option<i64> = conn
                    .query_row(
                        "SELECT version FROM reports WHERE report_id = ?1 AND is_active = 1",
                        params![&report.report_id],
                        |row| row.get(0),
                    )
                    .optional()?;
                match actual {
                    Some(actual) => Err(StoreError::VersionConflict { expected, actual }),
                    None => Err(StoreError::NotFound(format!("report {}", report.report_id))),
                }
            }
            (None, None) => Err(StoreError::NotFound(format!("report {}", report.report_id))),
        }
    }

    fn deactivate_report(&self, report_id: &str) -> Result<(), StoreError> {
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE reports SET is_active = 0, version = version + 1, updated_at = ?2
             WHERE report_id = ?1 AND is_active = 1",
            params![report_id, Utc::now()],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(format!("report {}", report_id)));
        }
        Ok(())
    }
}
