use actix_web::web;
use chrono::Duration;
use std::sync::Arc;
use user_services::application::auth_service::AuthService;
use user_services::application::user_service::UserService;
use user_services::data::database;
use user_services::data::user_repository::SeaOrmUserRepository;
use user_services::presentation::handlers::AppState;

pub const JWT_SECRET: &str = "test-secret-key-for-testing-only";

pub async fn test_state() -> web::Data<AppState> {
    let db = database::connect("sqlite::memory:").await.unwrap();
    let repository = Arc::new(SeaOrmUserRepository::new(db));

    web::Data::new(AppState {
        user_service: UserService::new(repository.clone()),
        auth_service: AuthService::new(repository, JWT_SECRET.to_string(), Duration::hours(1)),
    })
}

#[allow(unused_macros)]
macro_rules! setup_app {
    () => {{
        let state = common::test_state().await;
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(state)
                .wrap(user_services::presentation::middleware::JwtAuthMiddleware::new(
                    common::JWT_SECRET,
                ))
                .wrap(user_services::presentation::middleware::RequestContextMiddleware)
                .configure(user_services::presentation::configure),
        )
        .await
    }};
}

#[allow(unused_macros)]
macro_rules! register_user {
    ($app:expr, $name:expr, $email:expr, $password:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/api/User/Register")
            .set_json(serde_json::json!({
                "name": $name,
                "email": $email,
                "password": $password,
            }))
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
        let token: user_services::domain::user::UserToken =
            actix_web::test::read_body_json(resp).await;
        token
    }};
}
