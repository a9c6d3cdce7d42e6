use crate::data::entity::user::{self, ActiveModel as UserActive, Entity as UserEntity};
use crate::domain::repository::UserRepository;
use crate::domain::user::User;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use tracing::{debug, instrument, trace};
use uuid::Uuid;

#[derive(Clone)]
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<user::Model> for User {
    fn from(model: user::Model) -> Self {
        User {
            id: model.id,
            name: model.name,
            email: model.email,
            normalized_email: model.normalized_email,
            password_hash: model.password_hash,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<User> for UserActive {
    fn from(user: User) -> Self {
        UserActive {
            id: Set(user.id),
            name: Set(user.name),
            email: Set(user.email),
            normalized_email: Set(user.normalized_email),
            password_hash: Set(user.password_hash),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    #[instrument(skip(self))]
    async fn list_users(&self, offset: u64, limit: u64) -> Result<Vec<User>> {
        let users = UserEntity::find()
            .order_by_asc(user::Column::Name)
            .order_by_asc(user::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;
        debug!(returned = users.len(), "Users page loaded");
        Ok(users.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn count_users(&self) -> Result<u64> {
        Ok(UserEntity::find().count(&self.db).await?)
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = UserEntity::find_by_id(id).one(&self.db).await?;
        if user.is_none() {
            trace!(user_id = %id, "User not found in database");
        }
        Ok(user.map(User::from))
    }

    #[instrument(skip(self), fields(email = email))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = UserEntity::find()
            .filter(user::Column::NormalizedEmail.eq(email))
            .one(&self.db)
            .await?;
        if user.is_none() {
            trace!(email = email, "User not found in database");
        }
        Ok(user.map(User::from))
    }

    #[instrument(skip(self, user), fields(user_id = %user.id, email = %user.email))]
    async fn save_user(&self, user: User) -> Result<()> {
        UserEntity::insert(UserActive::from(user))
            .exec_without_returning(&self.db)
            .await?;
        debug!("User inserted");
        Ok(())
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update_profile(&self, user: &User) -> Result<bool> {
        let result = UserEntity::update_many()
            .col_expr(user::Column::Name, Expr::value(user.name.clone()))
            .col_expr(user::Column::Email, Expr::value(user.email.clone()))
            .col_expr(
                user::Column::NormalizedEmail,
                Expr::value(user.normalized_email.clone()),
            )
            .col_expr(user::Column::UpdatedAt, Expr::value(user.updated_at))
            .filter(user::Column::Id.eq(user.id))
            .exec(&self.db)
            .await?;
        debug!(rows = result.rows_affected, "User profile updated");
        Ok(result.rows_affected > 0)
    }

    #[instrument(skip(self, password_hash), fields(user_id = %id))]
    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> Result<bool> {
        let result = UserEntity::update_many()
            .col_expr(user::Column::PasswordHash, Expr::value(password_hash))
            .col_expr(user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        debug!(rows = result.rows_affected, "Password hash updated");
        Ok(result.rows_affected > 0)
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn delete_user(&self, id: Uuid) -> Result<bool> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;
        debug!(rows = result.rows_affected, "User delete executed");
        Ok(result.rows_affected > 0)
    }
}
