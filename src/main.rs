use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::sync::Arc;

use donelist::config::Config;
use donelist::routes;
use donelist::state::AppState;
use donelist::store::{MemoryStore, PgStore, Store};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    let store: Arc<dyn Store> = match &config.database_url {
        Some(database_url) => {
            let store = PgStore::connect(database_url, config.database_max_connections)
                .await
                .map_err(to_io_error)?;
            store.migrate().await.map_err(to_io_error)?;
            log::info!("connected to database");
            Arc::new(store)
        }
        None => {
            log::warn!("DATABASE_URL is not set, using the in-memory store");
            Arc::new(MemoryStore::new())
        }
    };

    let state = web::Data::new(AppState::from_config(store.clone(), &config));

    log::info!("Starting donelist server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await?;

    store.close().await;
    log::info!("store closed, shutting down");
    Ok(())
}

fn to_io_error(err: donelist::AppError) -> std::io::Error {
    log::error!("startup failed: {}", err);
    std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
}
