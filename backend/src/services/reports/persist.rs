//! # Report Write Path
//!
//! Shared by `POST /api/reports` and `PUT /api/reports/{report_id}`.
//!
//! 1.  On update, the stored report must exist, be active and belong to the requesting
//!     organization; otherwise the report is reported as not found.
//! 2.  Submission defaults are applied to the flat data (`forms::policy`).
//! 3.  The schema for the request's bank and property type is aggregated and the flat
//!     data organized against it.
//! 4.  The whole report document is upserted in one write and the store bumps the
//!     version. Updates are always conditional: on the request's `expected_version` when
//!     given, otherwise on the version read in step 1, so a report changed or deactivated
//!     in between is never overwritten.

use crate::forms::aggregator::aggregate;
use crate::forms::error::FormError;
use crate::forms::organizer::organize;
use crate::forms::policy::apply_submission_defaults;
use crate::state::AppState;
use crate::store::StoreError;
use chrono::Utc;
use common::model::report::{Report, WriteReceipt};
use common::requests::SaveReportRequest;
use log::info;
use uuid::Uuid;

pub fn save_report(
    state: &AppState,
    report_id: Option<String>,
    req: SaveReportRequest,
) -> Result<WriteReceipt, FormError> {
    let now = Utc::now();
    let (report_id, created_at, status, expected_version) = match report_id {
        Some(report_id) => {
            let existing = state
                .reports
                .get_report(&report_id)?
                .filter(|r| r.organization_id == req.organization_id)
                .ok_or_else(|| StoreError::NotFound(format!("report {}", report_id)))?;
            let status = req.status.unwrap_or(existing.status);
            let expected_version = req.expected_version.or(Some(existing.version));
            (report_id, existing.created_at, status, expected_version)
        }
        None => (
            Uuid::new_v4().to_string(),
            now,
            req.status.unwrap_or_default(),
            None,
        ),
    };

    let mut flat = req.report_data;
    apply_submission_defaults(&mut flat);

    let schema = aggregate(state.templates.as_ref(), &req.bank_code, &req.property_type)?;
    let data = organize(&flat, &schema)?;

    let report = Report {
        report_id,
        organization_id: req.organization_id,
        bank_code: req.bank_code,
        property_type: req.property_type,
        template_id: req.template_id,
        status,
        is_active: true,
        version: 0,
        created_at,
        updated_at: now,
        data,
    };
    let receipt = state.reports.upsert_report(&report, expected_version)?;

    info!(
        "Saved report {} v{} for {} ({}/{}): {} fields, {} tables",
        receipt.report_id,
        receipt.version,
        report.organization_id,
        report.bank_code,
        report.property_type,
        flat.len(),
        report.data.tables.len()
    );
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::fixtures;
    use crate::store::{ReportStore, SqliteStore, TemplateStore};
    use common::model::report::FlatFormData;
    use std::sync::{Arc, Mutex};

    /// Keeps one report in memory and records the version each write was conditioned on.
    #[derive(Default)]
    struct RecordingReports {
        stored: Mutex<Option<Report>>,
        conditions: Mutex<Vec<Option<i64>>>,
    }

    impl ReportStore for RecordingReports {
        fn get_report(&self, report_id: &str) -> Result<Option<Report>, StoreError> {
            let stored = self.stored.lock().unwrap();
            Ok(stored.clone().filter(|r| r.report_id == report_id))
        }

        fn upsert_report(
            &self,
            report: &Report,
            expected_version: Option<i64>,
        ) -> Result<WriteReceipt, StoreError> {
            self.conditions.lock().unwrap().push(expected_version);
            let mut stored = self.stored.lock().unwrap();
            let version = stored.as_ref().map_or(0, |r| r.version) + 1;
            *stored = Some(Report {
                version,
                ..report.clone()
            });
            Ok(WriteReceipt {
                report_id: report.report_id.clone(),
                version,
                updated_at: report.updated_at,
            })
        }

        fn deactivate_report(&self, _report_id: &str) -> Result<(), StoreError> {
            unimplemented!()
        }
    }

    fn request(expected_version: Option<i64>) -> SaveReportRequest {
        let mut report_data = FlatFormData::new();
        report_data.insert("land_area".to_string(), "1000".into());
        SaveReportRequest {
            organization_id: "org-1".to_string(),
            bank_code: "SBI".to_string(),
            property_type: "land".to_string(),
            template_id: None,
            status: None,
            report_data,
            expected_version,
        }
    }

    #[test]
    fn updates_are_conditioned_on_the_version_read() {
        let templates = Arc::new(SqliteStore::open_in_memory().unwrap());
        templates.save_template(&fixtures::template()).unwrap();
        let reports = Arc::new(RecordingReports::default());
        let state = AppState::new(templates, reports.clone());

        let created = save_report(&state, None, request(None)).unwrap();
        save_report(&state, Some(created.report_id.clone()), request(None)).unwrap();
        save_report(&state, Some(created.report_id), request(Some(7))).unwrap();

        assert_eq!(*reports.conditions.lock().unwrap(), [None, Some(1), Some(7)]);
    }
}
