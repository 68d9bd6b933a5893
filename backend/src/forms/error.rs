use crate::forms::index::FieldLocation;
use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("template not found for bank '{bank_code}' and property type '{property_type}'")]
    TemplateNotFound {
        bank_code: String,
        property_type: String,
    },

    /// A template authoring defect. Never resolved silently, otherwise the organizer
    /// would place the value in whichever location happened to win.
    #[error("field id '{field_id}' is declared in {first} and again in {second}")]
    DuplicateFieldId {
        field_id: String,
        first: FieldLocation,
        second: FieldLocation,
    },

    #[error("invalid {kind} '{value}'")]
    InvalidIdentifier { kind: &'static str, value: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}
