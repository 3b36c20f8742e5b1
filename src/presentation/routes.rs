use crate::presentation::auth::{login, logout, signup};
use crate::presentation::handlers::{json_config, me, not_found, private, sitemap, status};
use actix_web::web;

/// Registers every route of the API. Middleware is applied by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(
            web::scope("/api")
                .route("/signup", web::post().to(signup))
                .route("/login", web::post().to(login))
                .route("/logout", web::post().to(logout))
                .route("/private", web::get().to(private))
                .route("/me", web::get().to(me))
                .route("/status", web::get().to(status))
                .default_service(web::to(not_found)),
        )
        .route("/sitemap", web::get().to(sitemap));
}
