//! Shared application state injected into every handler.
//!
//! `AppState` is built once in `main.rs` and registered as `web::Data`. It holds the
//! stores behind trait objects so the services never name a concrete backend; tests
//! build it around `SqliteStore::open_in_memory` instead.

use crate::store::{ReportStore, TemplateStore};
use std::sync::Arc;

/// A clonable handle to the persistence collaborators.
#[derive(Clone)]
pub struct AppState {
    /// Bank templates and the common-fields collection.
    pub templates: Arc<dyn TemplateStore>,
    /// Report documents, one per report id.
    pub reports: Arc<dyn ReportStore>,
}

impl AppState {
    pub fn new(templates: Arc<dyn TemplateStore>, reports: Arc<dyn ReportStore>) -> Self {
        Self { templates, reports }
    }
}
