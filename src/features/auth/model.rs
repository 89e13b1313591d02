use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::shared::constants::{
    ROLE_ADMIN, ROLE_CLIENT, ROLE_EMPLOYEE, ROLE_INVENTORY_WORKER, ROLE_MANAGER,
};

/// Principal attached to every authenticated request.
///
/// Application accounts (admin, manager, inventory worker, clients) carry their
/// account id in `sub`. Employees log in with their lot's shared password, so their
/// `sub` is `company:<id>` and `company_id` is set.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub username: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    pub display_name: String,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }

    pub fn is_client(&self) -> bool {
        self.has_role(ROLE_CLIENT)
    }

    pub fn is_employee(&self) -> bool {
        self.has_role(ROLE_EMPLOYEE)
    }

    /// Manager screens are open to the admin as well
    pub fn has_manager_access(&self) -> bool {
        self.is_admin() || self.has_role(ROLE_MANAGER)
    }

    pub fn has_inventory_access(&self) -> bool {
        self.is_admin() || self.has_role(ROLE_INVENTORY_WORKER)
    }

    /// An employee only sees their own lot; the admin sees every lot.
    pub fn can_access_company(&self, company_id: i64) -> bool {
        self.is_admin() || (self.is_employee() && self.company_id == Some(company_id))
    }

    /// Account id of an application user. Fails for employee principals.
    pub fn account_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::Forbidden("This action requires a personal account".to_string()))
    }
}

/// JWT claims issued by this service (HS256)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iss: String,
    pub iat: u64,
    pub exp: u64,
    pub username: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    pub name: String,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            sub: claims.sub,
            username: claims.username,
            role: claims.role,
            company_id: claims.company_id,
            display_name: claims.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str, company_id: Option<i64>) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: Uuid::new_v4().to_string(),
            username: "someone".to_string(),
            role: role.to_string(),
            company_id,
            display_name: "Someone".to_string(),
        }
    }

    #[test]
    fn test_company_access() {
        assert!(user(ROLE_ADMIN, None).can_access_company(3));
        assert!(user(ROLE_EMPLOYEE, Some(3)).can_access_company(3));
        assert!(!user(ROLE_EMPLOYEE, Some(3)).can_access_company(4));
        assert!(!user(ROLE_MANAGER, None).can_access_company(3));
        assert!(!user(ROLE_CLIENT, Some(3)).can_access_company(3));
    }

    #[test]
    fn test_role_hierarchy() {
        assert!(user(ROLE_ADMIN, None).has_manager_access());
        assert!(user(ROLE_ADMIN, None).has_inventory_access());
        assert!(user(ROLE_MANAGER, None).has_manager_access());
        assert!(!user(ROLE_MANAGER, None).has_inventory_access());
        assert!(!user(ROLE_INVENTORY_WORKER, None).has_manager_access());
    }

    #[test]
    fn test_account_id_rejects_lot_principal() {
        let mut employee = user(ROLE_EMPLOYEE, Some(1));
        employee.sub = "company:1".to_string();
        assert!(matches!(employee.account_id(), Err(AppError::Forbidden(_))));
        assert!(user(ROLE_CLIENT, None).account_id().is_ok());
    }
}
