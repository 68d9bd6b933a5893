//! # Form Extraction
//!
//! Reverses `organizer`: flattens a stored `ReportData` back into the field id to value
//! map the form renders from. Tab ids are structural only and do not appear in the
//! result.
//!
//! Reports written before tables were segregated keep table payloads inside
//! `commonFields` or a tab map. Extraction scans every location, so those values still
//! surface under their own key. When a key exists both in `tables` and elsewhere, the
//! `tables` entry wins.

use crate::forms::classifier::is_table_shaped;
use common::model::report::{FlatFormData, ReportData};
use log::debug;
use serde_json::{Map, Value};

pub fn extract(data: &ReportData) -> FlatFormData {
    let mut flat = data.tables.clone();

    let legacy_locations =
        std::iter::once(&data.common_fields).chain(data.tabs.values());
    for location in legacy_locations {
        merge_location(&mut flat, location, &data.tables);
    }

    flat
}

/// Copies `location` into `flat` without overwriting keys already present: canonical
/// tables first, then earlier locations.
fn merge_location(flat: &mut FlatFormData, location: &Map<String, Value>, tables: &Map<String, Value>) {
    for (field_id, value) in location {
        if flat.contains_key(field_id) {
            if tables.contains_key(field_id) {
                debug!("'{}' found outside tables, keeping the tables entry", field_id);
            }
            continue;
        }
        if is_table_shaped(value) {
            debug!("Surfacing legacy table '{}' stored outside tables", field_id);
        }
        flat.insert(field_id.clone(), value.clone());
    }
}
