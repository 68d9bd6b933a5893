//! # Report Service Module
//!
//! Routes under `/api/reports`. Reports travel over the wire as flat field id to value
//! maps; in between, `forms::organizer` nests them for storage and
//! `forms::extractor` flattens them again on read.
//!
//! ## Sub-modules:
//! - `persist`: the write path shared by create and update.
//! - `create` / `update`: `POST /` and `PUT /{report_id}`.
//! - `get`: `GET /{report_id}`.
//! - `deactivate`: `DELETE /{report_id}`, a soft delete.

mod create;
mod deactivate;
mod get;
mod persist;
mod update;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/reports";

/// Configures and returns the Actix `Scope` for report routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(create::process))
        .route("/{report_id}", put().to(update::process))
        .route("/{report_id}", get().to(get::process))
        .route("/{report_id}", delete().to(deactivate::process))
}
