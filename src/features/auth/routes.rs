use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Public auth routes (no authentication required)
pub fn public_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/login", post(handlers::login))
        .with_state(service)
}

/// Protected auth routes (require JWT authentication)
pub fn protected_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/me", get(handlers::get_me))
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::time::Duration;

    use crate::core::config::AuthConfig;
    use crate::features::auth::TokenService;
    use crate::features::companies::dtos::SetCompanyPasswordDto;
    use crate::features::companies::repositories::MemoryCompanyRepository;
    use crate::features::companies::CompanyService;
    use crate::features::users::repositories::MemoryUserRepository;
    use crate::features::users::AccountService;
    use crate::shared::security::PasswordHasher;
    use crate::shared::test_helpers::{employee_user, with_user};

    async fn service() -> Arc<AuthService> {
        let hasher = PasswordHasher::new(4);
        let accounts = Arc::new(AccountService::new(
            Arc::new(MemoryUserRepository::new()),
            hasher,
        ));
        accounts.bootstrap_staff_accounts("chantier1").await.unwrap();
        let companies = Arc::new(CompanyService::new(
            Arc::new(MemoryCompanyRepository::seeded()),
            hasher,
        ));
        companies
            .set_password(
                1,
                SetCompanyPasswordDto {
                    password: "courant-2025".to_string(),
                },
            )
            .await
            .unwrap();
        let tokens = TokenService::new(&AuthConfig {
            jwt_secret: "route-tests-secret-route-tests-secret".to_string(),
            issuer: "chantier-core".to_string(),
            token_ttl: Duration::from_secs(600),
            jwt_leeway: Duration::ZERO,
            bcrypt_cost: 4,
        });
        Arc::new(AuthService::new(accounts, companies, tokens))
    }

    #[tokio::test]
    async fn test_login_over_http() {
        let server = TestServer::new(public_routes(service().await)).unwrap();

        let response = server
            .post("/api/auth/login")
            .json(&json!({ "username": "admin", "password": "chantier1" }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["token_type"], "Bearer");
        assert_eq!(body["data"]["user"]["role"], "admin");

        let employee: Value = server
            .post("/api/auth/login")
            .json(&json!({ "username": "electric", "password": "courant-2025" }))
            .await
            .json();
        assert_eq!(employee["data"]["user"]["role"], "employee");
        assert_eq!(employee["data"]["user"]["company_id"], 1);

        server
            .post("/api/auth/login")
            .json(&json!({ "username": "admin", "password": "wrong-one" }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .post("/api/auth/login")
            .json(&json!({ "username": "", "password": "chantier1" }))
            .await
            .assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_me_returns_principal() {
        let app = with_user(protected_routes(service().await), employee_user(4));
        let server = TestServer::new(app).unwrap();

        let body: Value = server.get("/api/auth/me").await.json();
        assert_eq!(body["data"]["role"], "employee");
        assert_eq!(body["data"]["company_id"], 4);
    }
}
