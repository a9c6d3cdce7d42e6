use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use chrono::Duration;
use std::sync::Arc;
use tracing::info;
use user_services::application::auth_service::AuthService;
use user_services::application::user_service::UserService;
use user_services::data::database;
use user_services::data::user_repository::SeaOrmUserRepository;
use user_services::infrastructure::config::AppConfig;
use user_services::infrastructure::logging::init_logging;
use user_services::presentation::configure;
use user_services::presentation::handlers::AppState;
use user_services::presentation::middleware::{JwtAuthMiddleware, RequestContextMiddleware};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    init_logging(&config.log_level);
    info!("Logging initialized successfully");

    let db = database::connect(&config.database_url).await?;
    let repository = Arc::new(SeaOrmUserRepository::new(db));
    info!("User repository created");

    let user_service = UserService::new(repository.clone());
    let auth_service = AuthService::new(
        repository,
        config.jwt_secret.clone(),
        Duration::seconds(config.token_ttl_secs),
    );

    let state = web::Data::new(AppState {
        user_service,
        auth_service,
    });
    info!("Application state initialized");

    let jwt_secret = config.jwt_secret.clone();
    let cors_origin = config.cors_allowed_origin.clone();

    let server = HttpServer::new(move || {
        let cors = match &cors_origin {
            Some(origin) => Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header()
                .expose_headers(["x-request-id", "x-response-time"]),
            None => Cors::default(),
        };

        App::new()
            .app_data(state.clone())
            .wrap(JwtAuthMiddleware::new(jwt_secret.clone()))
            .wrap(RequestContextMiddleware)
            .wrap(cors)
            .configure(configure)
    });

    let bind_addr = format!("{}:{}", config.host, config.port);
    let server = server.bind((config.host.as_str(), config.port))?;
    info!(
        address = %bind_addr,
        routes = %"GET /api/health, GET /api/User/GetUsers, GET /api/User/GetUserById, POST /api/User/Register, POST /api/User/Login, PUT /api/User/Update, PUT /api/User/UpdatePassword, PUT /api/User/ForgotPassword, DELETE /api/User/Delete",
        "Starting HTTP server"
    );

    server.run().await?;
    Ok(())
}
