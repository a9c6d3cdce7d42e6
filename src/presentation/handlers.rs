use crate::application::auth_service::AuthService;
use crate::application::user_service::UserService;
use crate::data::user_repository::SeaOrmUserRepository;
use crate::domain::user::{ListUsersQuery, UpdateUser, UserIdQuery};
use crate::presentation::error::ApiError;
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::{FromRequest, HttpMessage, HttpResponse, web};
use chrono::Utc;
use serde::Serialize;
use std::pin::Pin;
use tracing::{error, info, instrument};

pub struct AppState {
    pub user_service: UserService<SeaOrmUserRepository>,
    pub auth_service: AuthService<SeaOrmUserRepository>,
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        Box::pin(async move {
            user.ok_or_else(|| ApiError::Unauthorized("User not authenticated".to_string()))
        })
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    timestamp: String,
}

#[instrument]
pub async fn health_check() -> HttpResponse {
    info!("Health check requested");
    let response = HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    };
    HttpResponse::Ok().json(response)
}

#[instrument(skip(state))]
pub async fn get_users(
    state: web::Data<AppState>,
    query: web::Query<ListUsersQuery>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();
    info!(
        page_size = query.page_size,
        page_index = query.page_index,
        "Listing users"
    );
    let page = state.user_service.list_users(query).await.map_err(|e| {
        error!(error = %e, "Failed to list users");
        ApiError::from(e)
    })?;
    info!(
        returned = page.users.len(),
        user_count = page.user_count,
        "Users listed"
    );
    Ok(HttpResponse::Ok().json(page))
}

#[instrument(skip(state), fields(user_id = %query.id))]
pub async fn get_user_by_id(
    state: web::Data<AppState>,
    query: web::Query<UserIdQuery>,
) -> Result<HttpResponse, ApiError> {
    let user_id = query.into_inner().id;
    let user = state.user_service.get_user(user_id).await.map_err(|e| {
        error!(user_id = %user_id, error = %e, "Failed to get user");
        ApiError::from(e)
    })?;
    info!(user_id = %user.id, "User retrieved");
    Ok(HttpResponse::Ok().json(user))
}

#[instrument(skip(state, req), fields(user_id = %req.id))]
pub async fn update_user(
    state: web::Data<AppState>,
    req: web::Json<UpdateUser>,
) -> Result<HttpResponse, ApiError> {
    let user = state
        .user_service
        .update_user(req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to update user");
            ApiError::from(e)
        })?;
    info!(user_id = %user.id, "User updated successfully");
    Ok(HttpResponse::Ok().json(user))
}

#[instrument(skip(state), fields(user_id = %query.id))]
pub async fn delete_user(
    state: web::Data<AppState>,
    query: web::Query<UserIdQuery>,
) -> Result<HttpResponse, ApiError> {
    let user_id = query.into_inner().id;
    state.user_service.delete_user(user_id).await.map_err(|e| {
        error!(user_id = %user_id, error = %e, "Failed to delete user");
        ApiError::from(e)
    })?;
    info!(user_id = %user_id, "User deleted successfully");
    Ok(HttpResponse::Ok().finish())
}
