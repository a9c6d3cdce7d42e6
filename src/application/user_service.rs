use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{ListUsersQuery, UpdateUser, User, UserPage, normalize_email};
use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self, query: ListUsersQuery) -> Result<UserPage> {
        let (offset, limit) = query.window()?;
        let users = self.repository.list_users(offset, limit).await?;
        let user_count = self.repository.count_users().await?;
        debug!(returned = users.len(), user_count, "Listed users");
        Ok(UserPage { users, user_count })
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> Result<User> {
        self.repository
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("User with id {} not found.", id)).into())
    }

    /// Updates name and email. The stored password hash is never touched here.
    #[instrument(skip(self, req), fields(user_id = %req.id))]
    pub async fn update_user(&self, req: UpdateUser) -> Result<User> {
        req.validate()?;

        let mut user = self
            .repository
            .find_user_by_id(req.id)
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found.".to_string()))?;

        let normalized_email = normalize_email(&req.email);
        if normalized_email != user.normalized_email
            && self
                .repository
                .find_user_by_email(&normalized_email)
                .await?
                .is_some()
        {
            warn!(user_id = %req.id, "Email already taken by another user");
            return Err(
                DomainError::Validation("User with this email already exists".to_string()).into(),
            );
        }

        user.name = req.name.trim().to_string();
        user.email = req.email.trim().to_string();
        user.normalized_email = normalized_email;
        user.updated_at = Utc::now();

        if !self.repository.update_profile(&user).await? {
            // Deleted between the lookup and the update.
            return Err(DomainError::NotFound("User not found.".to_string()).into());
        }

        info!(user_id = %user.id, "User updated");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> Result<()> {
        if !self.repository.delete_user(id).await? {
            return Err(DomainError::NotFound("User not found.".to_string()).into());
        }
        info!(user_id = %id, "User deleted");
        Ok(())
    }
}
