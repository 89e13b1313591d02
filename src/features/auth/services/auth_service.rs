use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{AuthResponseDto, LoginRequestDto, MeResponseDto};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::TokenService;
use crate::features::companies::CompanyService;
use crate::features::users::models::{AppRole, AppUser};
use crate::features::users::AccountService;
use crate::shared::constants::{
    ADMIN_USERNAME, CLIENT_USERNAME_PREFIX, INVENTORY_USERNAME, MANAGER_USERNAME, ROLE_EMPLOYEE,
};
use crate::shared::validation::client_display_name;

/// Which kind of principal a login name refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginTarget {
    /// Fixed staff account or client account, checked against `app_users`
    Account(AppRole),
    /// Lot login, checked against the lot's shared password
    Employee,
}

impl LoginTarget {
    pub fn for_username(username: &str) -> Self {
        match username {
            ADMIN_USERNAME => LoginTarget::Account(AppRole::Admin),
            MANAGER_USERNAME => LoginTarget::Account(AppRole::Manager),
            INVENTORY_USERNAME => LoginTarget::Account(AppRole::InventoryWorker),
            u if u.starts_with(CLIENT_USERNAME_PREFIX) => LoginTarget::Account(AppRole::Client),
            _ => LoginTarget::Employee,
        }
    }
}

fn invalid_credentials() -> AppError {
    AppError::Auth("Invalid username or password".to_string())
}

pub struct AuthService {
    accounts: Arc<AccountService>,
    companies: Arc<CompanyService>,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(
        accounts: Arc<AccountService>,
        companies: Arc<CompanyService>,
        tokens: TokenService,
    ) -> Self {
        Self {
            accounts,
            companies,
            tokens,
        }
    }

    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let username = dto.username.trim().to_lowercase();

        let principal = match LoginTarget::for_username(&username) {
            LoginTarget::Account(role) => {
                let user = self
                    .accounts
                    .verify_credentials(&username, role, &dto.password)
                    .await?
                    .ok_or_else(invalid_credentials)?;
                account_principal(user)
            }
            LoginTarget::Employee => self.employee_principal(&username, &dto.password).await?,
        };

        let issued = self.tokens.issue(&principal)?;
        tracing::info!(
            "Login: username={}, role={}",
            principal.username,
            principal.role
        );

        Ok(AuthResponseDto {
            access_token: issued.access_token,
            token_type: "Bearer".to_string(),
            expires_in: issued.expires_in,
            user: principal.into(),
        })
    }

    pub fn me(&self, user: AuthenticatedUser) -> MeResponseDto {
        user.into()
    }

    async fn employee_principal(&self, username: &str, password: &str) -> Result<AuthenticatedUser> {
        let company = self
            .companies
            .find_for_login(username)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !self.companies.verify_password(company.id, password).await? {
            return Err(invalid_credentials());
        }

        Ok(AuthenticatedUser {
            sub: format!("company:{}", company.id),
            username: username.to_string(),
            role: ROLE_EMPLOYEE.to_string(),
            company_id: Some(company.id),
            display_name: company.name,
        })
    }
}

fn account_principal(user: AppUser) -> AuthenticatedUser {
    let display_name = match user.role {
        AppRole::Client => user
            .company_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| client_display_name(&user.username)),
        _ => user.username.clone(),
    };

    AuthenticatedUser {
        sub: user.id.to_string(),
        username: user.username,
        role: user.role.as_str().to_string(),
        company_id: None,
        display_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AuthConfig;
    use crate::features::auth::JwtValidator;
    use crate::features::companies::dtos::SetCompanyPasswordDto;
    use crate::features::companies::repositories::MemoryCompanyRepository;
    use crate::features::users::dtos::CreateClientDto;
    use crate::features::users::repositories::MemoryUserRepository;
    use crate::shared::security::PasswordHasher;
    use std::time::Duration;

    const SECRET: &str = "login-tests-secret-login-tests-secret";

    struct Fixture {
        auth: AuthService,
        accounts: Arc<AccountService>,
        companies: Arc<CompanyService>,
    }

    fn fixture() -> Fixture {
        let hasher = PasswordHasher::new(4);
        let accounts = Arc::new(AccountService::new(
            Arc::new(MemoryUserRepository::new()),
            hasher,
        ));
        let companies = Arc::new(CompanyService::new(
            Arc::new(MemoryCompanyRepository::seeded()),
            hasher,
        ));
        let tokens = TokenService::new(&AuthConfig {
            jwt_secret: SECRET.to_string(),
            issuer: "chantier-core".to_string(),
            token_ttl: Duration::from_secs(600),
            jwt_leeway: Duration::ZERO,
            bcrypt_cost: 4,
        });
        Fixture {
            auth: AuthService::new(accounts.clone(), companies.clone(), tokens),
            accounts,
            companies,
        }
    }

    fn login(username: &str, password: &str) -> LoginRequestDto {
        LoginRequestDto {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_login_target_dispatch() {
        assert_eq!(
            LoginTarget::for_username("admin"),
            LoginTarget::Account(AppRole::Admin)
        );
        assert_eq!(
            LoginTarget::for_username("inventory"),
            LoginTarget::Account(AppRole::InventoryWorker)
        );
        assert_eq!(
            LoginTarget::for_username("client_acme"),
            LoginTarget::Account(AppRole::Client)
        );
        assert_eq!(LoginTarget::for_username("plomb"), LoginTarget::Employee);
        assert_eq!(LoginTarget::for_username("administrator"), LoginTarget::Employee);
    }

    #[tokio::test]
    async fn test_staff_login_issues_token_for_role() {
        let f = fixture();
        f.accounts.bootstrap_staff_accounts("bootstrap1").await.unwrap();

        let response = f.auth.login(login("Manager", "bootstrap1")).await.unwrap();
        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.user.role, "manager");

        let validator = JwtValidator::new(SECRET, "chantier-core".to_string(), Duration::ZERO);
        let user = validator.validate_token(&response.access_token).unwrap();
        assert!(user.has_manager_access());
        assert!(!user.is_admin());
    }

    #[tokio::test]
    async fn test_client_login_carries_company_display_name() {
        let f = fixture();
        f.accounts
            .create_client(CreateClientDto {
                name: "hotel du port".to_string(),
                password: "secret1".to_string(),
                company_name: None,
            })
            .await
            .unwrap();

        let response = f
            .auth
            .login(login("client_hotel_du_port", "secret1"))
            .await
            .unwrap();
        assert_eq!(response.user.role, "client");
        assert_eq!(response.user.display_name, "HOTEL DU PORT");
    }

    #[tokio::test]
    async fn test_employee_login_resolves_lot_alias() {
        let f = fixture();
        f.companies
            .set_password(
                3,
                SetCompanyPasswordDto {
                    password: "plomb-2025".to_string(),
                },
            )
            .await
            .unwrap();

        let response = f.auth.login(login("plomb", "plomb-2025")).await.unwrap();
        assert_eq!(response.user.role, "employee");
        assert_eq!(response.user.company_id, Some(3));
        assert_eq!(response.user.display_name, "LOT PLOMBERIE");

        let err = f.auth.login(login("plomb", "wrong")).await.unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
    }

    #[tokio::test]
    async fn test_unknown_principals_are_rejected_uniformly() {
        let f = fixture();
        for (username, password) in [("charpente", "x"), ("client_ghost", "x"), ("admin", "x")] {
            let err = f.auth.login(login(username, password)).await.unwrap_err();
            assert_eq!(err.to_string(), invalid_credentials().to_string());
        }
    }
}
