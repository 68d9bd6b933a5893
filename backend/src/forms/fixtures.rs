//! Shared test data: a small SBI land template with one group, one table and a tab that
//! carries its fields directly.

use crate::forms::aggregator::build_schema;
use common::model::field::{FieldDefinition, FieldType, TableSpec};
use common::model::template::{AggregatedSchema, Section, Tab, TemplateDocument};
use serde_json::json;

pub fn common_fields() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::new("inspection_date", FieldType::Date, 2),
        FieldDefinition::new("applicant_name", FieldType::Text, 1),
    ]
}

pub fn boundaries_table() -> FieldDefinition {
    let mut field = FieldDefinition::new("boundaries_table", FieldType::Table, 1);
    field.table_spec = Some(TableSpec {
        columns: Some(json!(["dir", "len"])),
        rows: Some(json!([])),
        ..TableSpec::default()
    });
    field
}

pub fn template() -> TemplateDocument {
    let owner = FieldDefinition::new("owner", FieldType::Group, 2).with_sub_fields(vec![
        FieldDefinition::new("owner_phone", FieldType::Text, 3),
        FieldDefinition::new("owner_name", FieldType::Text, 1),
        FieldDefinition::new("owner_email", FieldType::Text, 2),
    ]);

    TemplateDocument {
        template_id: "sbi-land-v1".to_string(),
        bank_code: "SBI".to_string(),
        property_type: "land".to_string(),
        template_name: "SBI Land Valuation".to_string(),
        tabs: vec![
            Tab {
                tab_id: "T1".to_string(),
                tab_name: "Property Details".to_string(),
                sections: vec![
                    Section {
                        section_id: "site".to_string(),
                        section_name: "Site".to_string(),
                        fields: vec![owner, FieldDefinition::new("land_area", FieldType::Number, 1)],
                    },
                    Section {
                        section_id: "boundaries".to_string(),
                        section_name: "Boundaries".to_string(),
                        fields: vec![boundaries_table()],
                    },
                ],
                fields: Vec::new(),
            },
            Tab {
                tab_id: "T2".to_string(),
                tab_name: "Access".to_string(),
                sections: Vec::new(),
                fields: vec![FieldDefinition::new("road_width", FieldType::Number, 1)],
            },
        ],
    }
}

pub fn schema() -> AggregatedSchema {
    build_schema(template(), common_fields()).expect("fixture schema is consistent")
}
