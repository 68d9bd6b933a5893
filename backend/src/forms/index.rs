use crate::forms::classifier::{classify_definition, FieldKind};
use crate::forms::error::FormError;
use common::model::field::FieldDefinition;
use common::model::template::AggregatedSchema;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Where a field id lives in the nested report layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldLocation {
    Common,
    Tab(String),
}

impl fmt::Display for FieldLocation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldLocation::Common => write!(f, "common fields"),
            FieldLocation::Tab(tab_id) => write!(f, "tab '{}'", tab_id),
        }
    }
}

/// Lookup of every field id in an aggregated schema, group subfields included.
#[derive(Debug, Default)]
pub struct FieldIndex {
    locations: HashMap<String, FieldLocation>,
    declared_tables: HashSet<String>,
}

impl FieldIndex {
    /// Indexes `schema`, failing on the first field id declared twice.
    pub fn build(schema: &AggregatedSchema) -> Result<Self, FormError> {
        let mut index = FieldIndex::default();

        for field in &schema.common_fields {
            index.insert(field, &FieldLocation::Common)?;
        }

        for tab in &schema.bank_specific_tabs {
            let location = FieldLocation::Tab(tab.tab_id.clone());
            let section_fields = tab.sections.iter().flat_map(|s| s.fields.iter());
            for field in tab.fields.iter().chain(section_fields) {
                index.insert(field, &location)?;
            }
        }

        Ok(index)
    }

    fn insert(&mut self, field: &FieldDefinition, location: &FieldLocation) -> Result<(), FormError> {
        if let Some(first) = self.locations.get(&field.field_id) {
            return Err(FormError::DuplicateFieldId {
                field_id: field.field_id.clone(),
                first: first.clone(),
                second: location.clone(),
            });
        }
        self.locations
            .insert(field.field_id.clone(), location.clone());

        if classify_definition(field) == FieldKind::Table {
            self.declared_tables.insert(field.field_id.clone());
        }
        // a table-typed group still owns its subfields
        for sub_field in &field.sub_fields {
            self.insert(sub_field, location)?;
        }
        Ok(())
    }

    pub fn location(&self, field_id: &str) -> Option<&FieldLocation> {
        self.locations.get(field_id)
    }

    pub fn is_declared_table(&self, field_id: &str) -> bool {
        self.declared_tables.contains(field_id)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
