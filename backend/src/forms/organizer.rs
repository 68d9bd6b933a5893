//! # Form Organization
//!
//! Turns the flat field id to value map submitted by the form into the nested
//! `ReportData` layout that gets persisted.
//!
//! ## Routing, per submitted key
//!
//! 1.  Table payloads go to `tables`. A value counts as a table when the schema declares
//!     the field as one *or* when the value itself is table-shaped; the second check
//!     catches tables the schema knows only as scalars.
//! 2.  Fields the schema marks as common go to `commonFields`.
//! 3.  Fields declared in a tab (group subfields included) go to `tabs[tabId]`.
//! 4.  Anything else is kept under `commonFields`. Unknown and legacy keys are never
//!     dropped.
//!
//! Each submitted key ends up in exactly one place. No defaults are filled in here; see
//! `forms::policy` for that.

use crate::forms::classifier::{classify_value, FieldKind};
use crate::forms::error::FormError;
use crate::forms::index::{FieldIndex, FieldLocation};
use common::model::report::{FlatFormData, ReportData};
use common::model::template::AggregatedSchema;
use log::debug;

/// Organizer bound to one aggregated schema. Building it is the only fallible step;
/// organizing itself always succeeds.
pub struct Organizer {
    index: FieldIndex,
}

impl Organizer {
    pub fn new(schema: &AggregatedSchema) -> Result<Self, FormError> {
        Ok(Self {
            index: FieldIndex::build(schema)?,
        })
    }

    pub fn organize(&self, flat: &FlatFormData) -> ReportData {
        let mut data = ReportData::default();

        for (field_id, value) in flat {
            let declared_table = self.index.is_declared_table(field_id);
            if declared_table || classify_value(value) == FieldKind::Table {
                if !declared_table {
                    debug!("Routing table-shaped value of '{}' to tables", field_id);
                }
                data.tables.insert(field_id.clone(), value.clone());
                continue;
            }

            match self.index.location(field_id) {
                Some(FieldLocation::Common) => {
                    data.common_fields.insert(field_id.clone(), value.clone());
                }
                Some(FieldLocation::Tab(tab_id)) => {
                    data.tabs
                        .entry(tab_id.clone())
                        .or_default()
                        .insert(field_id.clone(), value.clone());
                }
                None => {
                    debug!("Unknown field '{}' kept under commonFields", field_id);
                    data.common_fields.insert(field_id.clone(), value.clone());
                }
            }
        }

        data
    }
}

/// One-shot form of `Organizer::new(schema)?.organize(flat)`.
pub fn organize(flat: &FlatFormData, schema: &AggregatedSchema) -> Result<ReportData, FormError> {
    Ok(Organizer::new(schema)?.organize(flat))
}
