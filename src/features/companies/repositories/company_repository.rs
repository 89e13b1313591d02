use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::database::db_error;
use crate::core::error::Result;
use crate::features::companies::models::Company;

/// Storage boundary for lots and their employee passwords
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Company>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Company>>;

    async fn create(&self, name: &str) -> Result<Company>;

    async fn password_hash(&self, company_id: i64) -> Result<Option<String>>;

    async fn upsert_password(&self, company_id: i64, password_hash: &str) -> Result<()>;
}

pub struct PgCompanyRepository {
    pool: PgPool,
}

impl PgCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyRepository for PgCompanyRepository {
    async fn list(&self) -> Result<Vec<Company>> {
        sqlx::query_as::<_, Company>("SELECT id, name, created_at FROM companies ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list companies", e))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Company>> {
        sqlx::query_as::<_, Company>("SELECT id, name, created_at FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to get company", e))
    }

    async fn create(&self, name: &str) -> Result<Company> {
        sqlx::query_as::<_, Company>(
            "INSERT INTO companies (name) VALUES ($1) RETURNING id, name, created_at",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create company", e))
    }

    async fn password_hash(&self, company_id: i64) -> Result<Option<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT password_hash FROM company_passwords WHERE company_id = $1",
        )
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to read company password", e))
    }

    async fn upsert_password(&self, company_id: i64, password_hash: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO company_passwords (company_id, password_hash, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (company_id)
            DO UPDATE SET password_hash = EXCLUDED.password_hash, updated_at = NOW()
            "#,
        )
        .bind(company_id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to set company password", e))?;

        Ok(())
    }
}
