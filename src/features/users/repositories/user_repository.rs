use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::db_error;
use crate::core::error::Result;
use crate::features::users::models::{AppRole, AppUser, NewAppUser};

const USER_COLUMNS: &str = "id, username, password_hash, role, company_name, created_at, updated_at";

/// Storage boundary for application accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<AppUser>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AppUser>>;

    /// Accounts with `role`, newest first
    async fn list_by_role(&self, role: AppRole) -> Result<Vec<AppUser>>;

    /// Fails with `Conflict` when the username is taken
    async fn insert(&self, user: NewAppUser) -> Result<AppUser>;

    /// Returns false when no account matched
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool>;

    /// Deletes only when the account has `role`; returns false otherwise
    async fn delete(&self, id: Uuid, role: AppRole) -> Result<bool>;
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<AppUser>> {
        sqlx::query_as::<_, AppUser>(&format!(
            "SELECT {} FROM app_users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to get user by username", e))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AppUser>> {
        sqlx::query_as::<_, AppUser>(&format!(
            "SELECT {} FROM app_users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to get user by id", e))
    }

    async fn list_by_role(&self, role: AppRole) -> Result<Vec<AppUser>> {
        sqlx::query_as::<_, AppUser>(&format!(
            "SELECT {} FROM app_users WHERE role = $1 ORDER BY created_at DESC",
            USER_COLUMNS
        ))
        .bind(role)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list users", e))
    }

    async fn insert(&self, user: NewAppUser) -> Result<AppUser> {
        sqlx::query_as::<_, AppUser>(&format!(
            r#"
            INSERT INTO app_users (id, username, password_hash, role, company_name)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(Uuid::now_v7())
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(&user.company_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create user", e))
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE app_users SET password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update password", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid, role: AppRole) -> Result<bool> {
        let result = sqlx::query("DELETE FROM app_users WHERE id = $1 AND role = $2")
            .bind(id)
            .bind(role)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete user", e))?;

        Ok(result.rows_affected() > 0)
    }
}
