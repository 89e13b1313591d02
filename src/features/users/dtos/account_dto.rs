use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::users::models::{AppRole, AppUser};
use crate::shared::constants::{INVENTORY_USERNAME, MANAGER_USERNAME, MIN_PASSWORD_LENGTH};
use crate::shared::validation::client_display_name;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateClientDto {
    /// Client name; the username becomes `client_<name>` lowercased with underscores
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: String,

    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "Password must be at least 6 characters"))]
    pub password: String,

    /// Display company name (defaults to the name uppercased)
    #[validate(length(max = 100, message = "Company name must be at most 100 characters"))]
    pub company_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordDto {
    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "Password must be at least 6 characters"))]
    pub new_password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordDto {
    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "Password must be at least 6 characters"))]
    pub new_password: String,

    #[validate(must_match(other = "new_password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

/// Fixed staff accounts whose password the admin can change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StaffAccount {
    Manager,
    Inventory,
}

impl StaffAccount {
    pub fn username(&self) -> &'static str {
        match self {
            StaffAccount::Manager => MANAGER_USERNAME,
            StaffAccount::Inventory => INVENTORY_USERNAME,
        }
    }

    pub fn role(&self) -> AppRole {
        match self {
            StaffAccount::Manager => AppRole::Manager,
            StaffAccount::Inventory => AppRole::InventoryWorker,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClientAccountDto {
    pub id: Uuid,
    pub username: String,
    pub company_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<AppUser> for ClientAccountDto {
    fn from(user: AppUser) -> Self {
        let company_name = user
            .company_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| client_display_name(&user.username));
        Self {
            id: user.id,
            username: user.username,
            company_name,
            created_at: user.created_at,
        }
    }
}
