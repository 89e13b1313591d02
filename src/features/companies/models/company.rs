use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// A contractor lot, e.g. "LOT PLOMBERIE"
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
