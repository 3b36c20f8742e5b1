use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use chrono::Duration;
use session_gate::application::auth_service::AuthService;
use session_gate::data::user_repository::InMemoryUserRepository;
use session_gate::infrastructure::config::ServerConfig;
use session_gate::infrastructure::logging::init_logging;
use session_gate::presentation::handlers::{AppState, ROUTES};
use session_gate::presentation::middleware::{
    JwtAuthMiddleware, RequestIdMiddleware, TimingMiddleware,
};
use session_gate::presentation::routes::configure;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    let config = ServerConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    if config.uses_default_secret() {
        warn!("JWT_SECRET is not set; using the built-in development secret");
    }
    info!(
        debug = config.debug,
        jwt_expire_hours = config.jwt_expire_hours,
        "Configuration loaded"
    );

    let repository = InMemoryUserRepository::new();
    let auth_service = Arc::new(AuthService::new(
        Arc::new(repository),
        config.jwt_secret.clone(),
        Duration::hours(config.jwt_expire_hours),
    ));

    let state = web::Data::new(AppState {
        auth_service: auth_service.clone(),
        debug: config.debug,
    });

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(JwtAuthMiddleware::new(auth_service.clone()))
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(Cors::permissive())
            .configure(configure)
    });

    let bind_addr = format!("{}:{}", config.host, config.port);
    let server = server.bind((config.host.as_str(), config.port))?;
    info!(
        address = %bind_addr,
        routes = %ROUTES.join(", "),
        "Starting HTTP server"
    );
    server.run().await
}
