use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::sync::Arc;

use listforge::auth::{AuthMiddleware, CredentialStore};
use listforge::config::Config;
use listforge::routes::{self, health};
use listforge::store::PgStore;
use listforge::TaskService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(|e| {
        log::error!("invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    let store = PgStore::connect(&config.database_url, config.database_max_connections)
        .await
        .map_err(|e| {
            log::error!("could not open the database: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, e)
        })?;

    let credentials =
        CredentialStore::new(&config.jwt_secret, config.token_ttl_days, config.bcrypt_cost);
    let tasks = web::Data::new(TaskService::new(Arc::new(store), credentials));

    log::info!("Starting listforge server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(tasks.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            )
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
