use crate::domain::user::{
    ForgotPassword, LoginRequest, RegisterUser, ResetPasswordResponse, UpdatePassword,
};
use crate::presentation::error::ApiError;
use crate::presentation::handlers::AppState;
use crate::presentation::middleware::AuthenticatedUser;
use actix_web::{HttpResponse, web};
use tracing::{error, info, instrument};

#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterUser>,
) -> Result<HttpResponse, ApiError> {
    info!(email = %req.email, "Registration request received");

    let token = state
        .auth_service
        .register(req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to register user");
            ApiError::from(e)
        })?;

    info!(expiration = %token.expiration, "User registered successfully");
    Ok(HttpResponse::Ok().json(token))
}

#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    info!(email = %req.email, "Login request received");

    let token = state
        .auth_service
        .login(req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to login");
            ApiError::from(e)
        })?;

    info!("Login successful");
    Ok(HttpResponse::Ok().json(token))
}

#[instrument(skip(state, user, req), fields(email = %user.email))]
pub async fn update_password(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<UpdatePassword>,
) -> Result<HttpResponse, ApiError> {
    info!(email = %user.email, "Password update requested");

    state
        .auth_service
        .update_password(&user.email, req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to update password");
            ApiError::from(e)
        })?;

    info!(email = %user.email, "Password updated successfully");
    Ok(HttpResponse::Ok().finish())
}

#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn forgot_password(
    state: web::Data<AppState>,
    req: web::Json<ForgotPassword>,
) -> Result<HttpResponse, ApiError> {
    info!(email = %req.email, "Password reset requested");

    let password = state
        .auth_service
        .forgot_password(req.into_inner())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to reset password");
            ApiError::from(e)
        })?;

    info!("Password reset successfully");
    Ok(HttpResponse::Ok().json(ResetPasswordResponse { password }))
}
