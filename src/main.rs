use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{
    middleware::{Logger, NormalizePath, TrailingSlash},
    web, App, HttpServer,
};

use config::{Config, StoreKind};
use store::{memory::MemoryNoteStore, postgres::PgNoteStore, NoteStore};

#[macro_use]
extern crate diesel;

mod config;
mod errors;
mod handlers;
mod models;
mod schema;
mod store;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().expect("invalid environment configuration");

    let store: Arc<dyn NoteStore> = match config.store {
        StoreKind::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .expect("env DATABASE_URL");
            Arc::new(PgNoteStore::connect(database_url).expect("failed to open the note store"))
        }
        StoreKind::Memory => {
            log::warn!("using the in-memory note store, notes will not survive a restart");
            Arc::new(MemoryNoteStore::new())
        }
    };
    let store = web::Data::from(store);

    let governor_conf = GovernorConfigBuilder::default()
        .per_second(config.rate_limit_replenish_secs)
        .burst_size(config.rate_limit_burst)
        .finish()
        .expect("RATE_LIMIT_BURST and RATE_LIMIT_REPLENISH_SECS must be positive");

    log::info!("listening on 0.0.0.0:{}", config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .configure(handlers::configure)
            .default_service(web::to(handlers::not_found))
            .wrap(NormalizePath::new(TrailingSlash::Trim))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Governor::new(&governor_conf))
            .wrap(Logger::default())
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
