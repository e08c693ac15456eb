mod api;
mod config;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ {}", e);
            std::process::exit(1);
        }
    };

    log::info!("🚀 Starting Auth Service...");

    let store = web::Data::new(database::UserStore::new(config.users_file.clone()));
    log::info!("📂 Users file: {}", store.path().display());
    log::info!("🌍 Public directory: {}", config.public_dir.display());
    log::info!("🔑 Password storage: {:?}", config.password_policy);

    let policy = web::Data::new(config.password_policy);
    let public_dir = config.public_dir.clone();

    let server = HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(store.clone())
            .app_data(policy.clone())
            .wrap(middleware::SecurityHeaders)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(api::routes(public_dir.clone()))
    })
    .bind((config.host.as_str(), config.port))?;

    log::info!("Server listening on http://{}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    server.run().await
}
