use crate::domain::user::User;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// One page of users ordered by name, then id.
    async fn list_users(&self, offset: u64, limit: u64) -> Result<Vec<User>>;
    async fn count_users(&self) -> Result<u64>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>>;
    /// Looks the user up by normalized email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn save_user(&self, user: User) -> Result<()>;
    /// Writes name and email columns only; the password hash is untouched.
    async fn update_profile(&self, user: &User) -> Result<bool>;
    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> Result<bool>;
    async fn delete_user(&self, id: Uuid) -> Result<bool>;
}
