use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{
    ForgotPassword, LoginRequest, RegisterUser, UpdatePassword, User, UserToken, normalize_email,
};
use crate::infrastructure::security::{
    generate_reset_password, generate_token, hash_password, verify_password,
};
use anyhow::Result;
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, trace, warn};
use uuid::Uuid;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AuthService<R: UserRepository> {
    user_repository: Arc<R>,
    jwt_secret: String,
    token_ttl: Duration,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(user_repository: Arc<R>, jwt_secret: String, token_ttl: Duration) -> Self {
        Self {
            user_repository,
            jwt_secret,
            token_ttl,
        }
    }

    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn register(&self, req: RegisterUser) -> Result<UserToken> {
        trace!("Starting user registration");
        req.validate()?;

        let normalized_email = normalize_email(&req.email);
        if self
            .user_repository
            .find_user_by_email(&normalized_email)
            .await?
            .is_some()
        {
            warn!(email = %req.email, "User already exists");
            return Err(
                DomainError::Validation("User with this email already exists".to_string()).into(),
            );
        }

        let password_hash = hash_password(&req.password).map_err(|e| {
            error!(error = %e, "Failed to hash password");
            DomainError::Internal(format!("Failed to hash password: {}", e))
        })?;

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: req.name.trim().to_string(),
            email: req.email.trim().to_string(),
            normalized_email,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        debug!(user_id = %user.id, "Saving user to repository");
        self.user_repository.save_user(user.clone()).await?;

        let token = self.issue_token(&user)?;
        info!(user_id = %user.id, email = %user.email, "User registered successfully");
        Ok(token)
    }

    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn login(&self, req: LoginRequest) -> Result<UserToken> {
        trace!("Starting login");

        let user = self
            .user_repository
            .find_user_by_email(&normalize_email(&req.email))
            .await?
            .ok_or_else(|| {
                warn!(email = %req.email, "User not found during login");
                DomainError::Unauthorized(INVALID_CREDENTIALS.to_string())
            })?;

        if !self.check_password(&req.password, &user)? {
            warn!(user_id = %user.id, "Invalid password during login");
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.to_string()).into());
        }

        let token = self.issue_token(&user)?;
        info!(user_id = %user.id, email = %user.email, "Login successful");
        Ok(token)
    }

    /// `email` is the subject of the caller's verified token.
    #[instrument(skip(self, req))]
    pub async fn update_password(&self, email: &str, req: UpdatePassword) -> Result<()> {
        req.validate()?;

        let user = self
            .user_repository
            .find_user_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| {
                warn!(email = %email, "Token subject no longer matches a user");
                DomainError::Unauthenticated("Token subject no longer exists".to_string())
            })?;

        if !self.check_password(&req.current_password, &user)? {
            warn!(user_id = %user.id, "Current password mismatch");
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.to_string()).into());
        }

        self.store_password(&user, &req.new_password).await?;
        info!(user_id = %user.id, "Password updated");
        Ok(())
    }

    /// Replaces the password with a fresh six digit code and returns it.
    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn forgot_password(&self, req: ForgotPassword) -> Result<String> {
        let user = self
            .user_repository
            .find_user_by_email(&normalize_email(&req.email))
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found.".to_string()))?;

        let password = generate_reset_password();
        self.store_password(&user, &password).await?;

        info!(user_id = %user.id, "Password reset");
        Ok(password)
    }

    fn check_password(&self, password: &str, user: &User) -> Result<bool> {
        let is_valid = verify_password(password, &user.password_hash).map_err(|e| {
            error!(error = %e, "Failed to verify password");
            DomainError::Internal(format!("Failed to verify password: {}", e))
        })?;
        Ok(is_valid)
    }

    async fn store_password(&self, user: &User, password: &str) -> Result<()> {
        let password_hash = hash_password(password).map_err(|e| {
            error!(error = %e, "Failed to hash password");
            DomainError::Internal(format!("Failed to hash password: {}", e))
        })?;

        if !self
            .user_repository
            .update_password_hash(user.id, &password_hash)
            .await?
        {
            return Err(DomainError::NotFound("User not found.".to_string()).into());
        }
        Ok(())
    }

    fn issue_token(&self, user: &User) -> Result<UserToken> {
        let token = generate_token(&user.email, &self.jwt_secret, self.token_ttl).map_err(|e| {
            error!(error = %e, "Failed to generate token");
            DomainError::Internal(format!("Failed to generate token: {}", e))
        })?;
        Ok(token)
    }
}
