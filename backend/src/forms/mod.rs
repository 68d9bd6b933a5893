//! # Form Core
//!
//! Everything between a bank template and a stored report lives here:
//!
//! - `aggregator`: merges the common-fields collection with a bank template into one
//!   `AggregatedSchema` for the form renderer.
//! - `classifier`: decides whether a definition or a submitted value is a scalar, a group
//!   or a table.
//! - `index`: the field id to location lookup both directions rely on; it is also where
//!   duplicate field ids are detected.
//! - `organizer`: flat submitted data to the nested `ReportData` layout.
//! - `extractor`: the inverse, including reports written before tables were segregated.
//! - `policy` and `validation`: caller-side defaults and write-time template checks.
//!
//! Nothing in this module performs I/O except `aggregator::aggregate`, which reads from an
//! injected `TemplateStore`.

pub mod aggregator;
pub mod classifier;
pub mod error;
pub mod extractor;
pub mod index;
pub mod organizer;
pub mod policy;
pub mod validation;

#[cfg(test)]
pub(crate) mod fixtures;
