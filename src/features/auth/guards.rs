//! Role-based authorization guards.
//!
//! Each guard reads the `AuthenticatedUser` placed in the request extensions by the
//! JWT middleware and rejects the request when the role does not match:
//! - admin: everything
//! - manager: ticket triage and material requests (admin included)
//! - inventory_worker: stock entry (admin included)
//! - client: own tickets only
//! - employee: tasks, damage reports and attendance of their own lot

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;

fn authenticated(parts: &Parts) -> Result<AuthenticatedUser, AppError> {
    parts
        .extensions
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))
}

/// Guard for admin-only handlers.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated(parts)?;
        if !user.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }
        Ok(RequireAdmin(user))
    }
}

/// Guard for manager handlers. Allows "manager" and "admin".
pub struct RequireManager(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireManager
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated(parts)?;
        if !user.has_manager_access() {
            return Err(AppError::Forbidden("Manager access required".to_string()));
        }
        Ok(RequireManager(user))
    }
}

/// Guard for stock entry. Allows "inventory_worker" and "admin".
pub struct RequireInventory(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireInventory
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated(parts)?;
        if !user.has_inventory_access() {
            return Err(AppError::Forbidden("Inventory access required".to_string()));
        }
        Ok(RequireInventory(user))
    }
}

/// Guard for client handlers.
pub struct RequireClient(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireClient
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated(parts)?;
        if !user.is_client() {
            return Err(AppError::Forbidden("Client access required".to_string()));
        }
        Ok(RequireClient(user))
    }
}

#[derive(Deserialize)]
struct CompanyPathParams {
    company_id: i64,
}

/// Guard for `/api/companies/{company_id}/...` routes.
///
/// Resolves the `company_id` path parameter and lets through the employees of that
/// lot and the admin.
pub struct CompanyAccess {
    pub user: AuthenticatedUser,
    pub company_id: i64,
}

impl<S> FromRequestParts<S> for CompanyAccess
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated(parts)?;

        let Path(params) = Path::<CompanyPathParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(format!("Invalid company id: {}", e)))?;

        if !user.can_access_company(params.company_id) {
            return Err(AppError::Forbidden(
                "You do not have access to this lot".to_string(),
            ));
        }

        Ok(CompanyAccess {
            user,
            company_id: params.company_id,
        })
    }
}
