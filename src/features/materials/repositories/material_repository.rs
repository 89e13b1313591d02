use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::db_error;
use crate::core::error::Result;
use crate::features::materials::models::MaterialRequest;

const COLUMNS: &str = "id, material_name, quantity, fulfilled, requested_at";

#[async_trait]
pub trait MaterialRepository: Send + Sync {
    async fn insert(&self, material_name: &str, quantity: i32) -> Result<MaterialRequest>;

    /// Newest first; `limit = None` returns every request
    async fn list(&self, limit: Option<i64>) -> Result<Vec<MaterialRequest>>;

    async fn set_fulfilled(&self, id: Uuid, fulfilled: bool) -> Result<Option<MaterialRequest>>;

    async fn delete(&self, id: Uuid) -> Result<bool>;
}

pub struct PgMaterialRepository {
    pool: PgPool,
}

impl PgMaterialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MaterialRepository for PgMaterialRepository {
    async fn insert(&self, material_name: &str, quantity: i32) -> Result<MaterialRequest> {
        sqlx::query_as::<_, MaterialRequest>(&format!(
            "INSERT INTO material_requests (id, material_name, quantity) VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        ))
        .bind(Uuid::now_v7())
        .bind(material_name)
        .bind(quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create material request", e))
    }

    async fn list(&self, limit: Option<i64>) -> Result<Vec<MaterialRequest>> {
        // LIMIT NULL means no limit in Postgres
        sqlx::query_as::<_, MaterialRequest>(&format!(
            "SELECT {COLUMNS} FROM material_requests ORDER BY requested_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list material requests", e))
    }

    async fn set_fulfilled(&self, id: Uuid, fulfilled: bool) -> Result<Option<MaterialRequest>> {
        sqlx::query_as::<_, MaterialRequest>(&format!(
            "UPDATE material_requests SET fulfilled = $2 WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(fulfilled)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update material request", e))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM material_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete material request", e))?;
        Ok(result.rows_affected() > 0)
    }
}
