mod config;
mod forms;
mod services;
mod state;
mod store;

use crate::config::AppConfig;
use crate::state::AppState;
use crate::store::SqliteStore;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;
use std::io;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env();
    let store = Arc::new(SqliteStore::open(&config.db_path).map_err(io::Error::other)?);
    let state = AppState::new(store.clone(), store);

    info!("Server running at {}", config.bind_url());

    let json_limit = config.json_limit;
    HttpServer::new(move || {
        App::new()
            .app_data(web::JsonConfig::default().limit(json_limit))
            .app_data(web::Data::new(state.clone()))
            .service(services::templates::configure_routes())
            .service(services::reports::configure_routes())
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
