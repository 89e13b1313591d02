use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::database::db_error;
use crate::core::error::Result;
use crate::features::inventory::models::{InventoryItem, InventoryPatch, NewInventoryItem};

const COLUMNS: &str = "id, item_name, quantity, location, category, notes, last_updated";

#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn insert(&self, item: NewInventoryItem) -> Result<InventoryItem>;

    /// Items whose name or location contains `search`, ignoring case. Sorted by name.
    async fn search(&self, search: Option<&str>) -> Result<Vec<InventoryItem>>;

    /// Apply `patch` and bump `last_updated`
    async fn update(&self, id: Uuid, patch: InventoryPatch) -> Result<Option<InventoryItem>>;

    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// `ILIKE` pattern matching `search` literally anywhere in the value
fn contains_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

pub struct PgInventoryRepository {
    pool: PgPool,
}

impl PgInventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryRepository for PgInventoryRepository {
    async fn insert(&self, item: NewInventoryItem) -> Result<InventoryItem> {
        sqlx::query_as::<_, InventoryItem>(&format!(
            r#"
            INSERT INTO inventory_items (id, item_name, quantity, location, category, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(Uuid::now_v7())
        .bind(&item.item_name)
        .bind(item.quantity)
        .bind(&item.location)
        .bind(&item.category)
        .bind(&item.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create inventory item", e))
    }

    async fn search(&self, search: Option<&str>) -> Result<Vec<InventoryItem>> {
        sqlx::query_as::<_, InventoryItem>(&format!(
            r#"
            SELECT {COLUMNS} FROM inventory_items
            WHERE $1::TEXT IS NULL
               OR item_name ILIKE $1
               OR location ILIKE $1
            ORDER BY item_name, last_updated DESC
            "#
        ))
        .bind(search.map(contains_pattern))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to search inventory", e))
    }

    async fn update(&self, id: Uuid, patch: InventoryPatch) -> Result<Option<InventoryItem>> {
        sqlx::query_as::<_, InventoryItem>(&format!(
            r#"
            UPDATE inventory_items SET
                item_name = COALESCE($2, item_name),
                quantity = COALESCE($3, quantity),
                location = CASE WHEN $4 THEN $5 ELSE location END,
                category = CASE WHEN $6 THEN $7 ELSE category END,
                notes = CASE WHEN $8 THEN $9 ELSE notes END,
                last_updated = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(patch.item_name)
        .bind(patch.quantity)
        .bind(patch.location.is_some())
        .bind(patch.location.flatten())
        .bind(patch.category.is_some())
        .bind(patch.category.flatten())
        .bind(patch.notes.is_some())
        .bind(patch.notes.flatten())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update inventory item", e))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM inventory_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete inventory item", e))?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("dépôt"), "%dépôt%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
    }
}
