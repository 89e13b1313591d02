use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Stock line counted by the inventory worker
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct InventoryItem {
    pub id: Uuid,
    pub item_name: String,
    pub quantity: i32,
    pub location: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewInventoryItem {
    pub item_name: String,
    pub quantity: i32,
    pub location: Option<String>,
    pub category: Option<String>,
    pub notes: Option<String>,
}

/// `None` leaves a column unchanged; `Some(None)` clears a nullable one
#[derive(Debug, Clone, Default)]
pub struct InventoryPatch {
    pub item_name: Option<String>,
    pub quantity: Option<i32>,
    pub location: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub notes: Option<Option<String>>,
}
