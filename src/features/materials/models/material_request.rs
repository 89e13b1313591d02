use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Material ordered by a manager for the site
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MaterialRequest {
    pub id: Uuid,
    pub material_name: String,
    pub quantity: i32,
    pub fulfilled: bool,
    pub requested_at: DateTime<Utc>,
}
