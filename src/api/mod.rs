pub mod auth;
pub mod health;
pub mod swagger;

use actix_files::Files;
use actix_web::web;
use std::path::PathBuf;

/// Registers the API routes, then static files from `public_dir` for
/// everything else.
pub fn routes(public_dir: PathBuf) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.route("/health", web::get().to(health::health_check))
            .route("/signup", web::post().to(auth::signup))
            .route("/login", web::post().to(auth::login))
            // Must stay last: mounted at the root it matches every path
            .service(Files::new("/", public_dir).index_file("index.html"));
    }
}
