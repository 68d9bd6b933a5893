//! Submission defaults applied by the report service before organizing. The organizer
//! itself never invents values.

use common::model::report::FlatFormData;
use serde_json::Value;

/// Fields that must never be stored blank, with the placeholder used instead.
const REQUIRED_DEFAULTS: [(&str, &str); 1] = [("applicant_name", "N/A")];

pub fn apply_submission_defaults(flat: &mut FlatFormData) {
    for (field_id, placeholder) in REQUIRED_DEFAULTS {
        let blank = match flat.get(field_id) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        };
        if blank {
            flat.insert(field_id.to_string(), Value::String(placeholder.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_applicant_name_gets_placeholder() {
        for blank in [json!(null), json!(""), json!("   ")] {
            let mut flat = FlatFormData::new();
            flat.insert("applicant_name".to_string(), blank);
            apply_submission_defaults(&mut flat);
            assert_eq!(flat["applicant_name"], "N/A");
        }

        let mut flat = FlatFormData::new();
        apply_submission_defaults(&mut flat);
        assert_eq!(flat["applicant_name"], "N/A");
    }

    #[test]
    fn existing_values_are_untouched() {
        let mut flat = FlatFormData::new();
        flat.insert("applicant_name".to_string(), json!("Jane"));
        flat.insert("land_area".to_string(), json!(""));
        apply_submission_defaults(&mut flat);

        assert_eq!(flat["applicant_name"], "Jane");
        assert_eq!(flat["land_area"], "");
    }
}
