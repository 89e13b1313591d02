#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
use crate::shared::constants::{
    ROLE_ADMIN, ROLE_CLIENT, ROLE_EMPLOYEE, ROLE_INVENTORY_WORKER, ROLE_MANAGER,
};

#[cfg(test)]
pub fn admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "0193d6c0-0000-7000-8000-000000000001".to_string(),
        username: "admin".to_string(),
        role: ROLE_ADMIN.to_string(),
        company_id: None,
        display_name: "admin".to_string(),
    }
}

#[cfg(test)]
pub fn manager_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "0193d6c0-0000-7000-8000-000000000002".to_string(),
        username: "manager".to_string(),
        role: ROLE_MANAGER.to_string(),
        company_id: None,
        display_name: "manager".to_string(),
    }
}

#[cfg(test)]
pub fn inventory_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "0193d6c0-0000-7000-8000-000000000003".to_string(),
        username: "inventory".to_string(),
        role: ROLE_INVENTORY_WORKER.to_string(),
        company_id: None,
        display_name: "inventory".to_string(),
    }
}

#[cfg(test)]
pub fn client_user(id: uuid::Uuid, name: &str) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: id.to_string(),
        username: crate::shared::validation::client_username(name),
        role: ROLE_CLIENT.to_string(),
        company_id: None,
        display_name: name.to_uppercase(),
    }
}

#[cfg(test)]
pub fn employee_user(company_id: i64) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: format!("company:{}", company_id),
        username: format!("lot{}", company_id),
        role: ROLE_EMPLOYEE.to_string(),
        company_id: Some(company_id),
        display_name: format!("LOT {}", company_id),
    }
}

/// Wrap `router` so every request runs as `user`, bypassing JWT validation
#[cfg(test)]
pub fn with_user(router: Router, user: AuthenticatedUser) -> Router {
    router.layer(axum::middleware::from_fn(
        move |mut request: Request, next: Next| {
            let user = user.clone();
            async move {
                request.extensions_mut().insert(user);
                let response: Response = next.run(request).await;
                response
            }
        },
    ))
}
