use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::constants::{ROLE_ADMIN, ROLE_CLIENT, ROLE_INVENTORY_WORKER, ROLE_MANAGER};

/// Role of an application account, matching the `app_role` database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "app_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AppRole {
    Admin,
    Manager,
    InventoryWorker,
    Client,
}

impl AppRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppRole::Admin => ROLE_ADMIN,
            AppRole::Manager => ROLE_MANAGER,
            AppRole::InventoryWorker => ROLE_INVENTORY_WORKER,
            AppRole::Client => ROLE_CLIENT,
        }
    }
}

impl std::fmt::Display for AppRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct AppUser {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: AppRole,
    pub company_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAppUser {
    pub username: String,
    pub password_hash: String,
    pub role: AppRole,
    pub company_name: Option<String>,
}
