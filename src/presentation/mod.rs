pub mod auth;
pub mod error;
pub mod handlers;
pub mod middleware;

use crate::presentation::error::ApiError;
use actix_web::web;
use tracing::warn;

/// Registers every route plus the body/query error handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        warn!(error = %err, "Rejected JSON payload");
        ApiError::BadRequest(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        warn!(error = %err, "Rejected query string");
        ApiError::BadRequest(err.to_string()).into()
    }))
    .service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health_check))
            .service(
                web::scope("/User")
                    .route("/GetUsers", web::get().to(handlers::get_users))
                    .route("/GetUserById", web::get().to(handlers::get_user_by_id))
                    .route("/Register", web::post().to(auth::register))
                    .route("/Login", web::post().to(auth::login))
                    .route("/Update", web::put().to(handlers::update_user))
                    .route("/UpdatePassword", web::put().to(auth::update_password))
                    .route("/ForgotPassword", web::put().to(auth::forgot_password))
                    .route("/Delete", web::delete().to(handlers::delete_user)),
            ),
    );
}
