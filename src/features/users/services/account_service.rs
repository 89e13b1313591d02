use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::users::dtos::{
    ChangePasswordDto, ClientAccountDto, CreateClientDto, ResetPasswordDto, StaffAccount,
};
use crate::features::users::models::{AppRole, AppUser, NewAppUser};
use crate::features::users::repositories::UserRepository;
use crate::shared::constants::{ADMIN_USERNAME, INVENTORY_USERNAME, MANAGER_USERNAME};
use crate::shared::security::PasswordHasher;
use crate::shared::validation::{
    client_display_name, client_handle, client_username, CLIENT_HANDLE_REGEX,
};

pub struct AccountService {
    repository: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
}

impl AccountService {
    pub fn new(repository: Arc<dyn UserRepository>, hasher: PasswordHasher) -> Self {
        Self { repository, hasher }
    }

    /// Account `username` with role `role` whose password matches, if any.
    ///
    /// Unknown usernames and role mismatches are indistinguishable from a wrong
    /// password.
    pub async fn verify_credentials(
        &self,
        username: &str,
        role: AppRole,
        password: &str,
    ) -> Result<Option<AppUser>> {
        let Some(user) = self.repository.find_by_username(username).await? else {
            return Ok(None);
        };
        if user.role != role {
            return Ok(None);
        }
        if !self.hasher.verify(password, Some(&user.password_hash)).await {
            return Ok(None);
        }
        Ok(Some(user))
    }

    pub async fn list_clients(&self) -> Result<Vec<ClientAccountDto>> {
        let clients = self.repository.list_by_role(AppRole::Client).await?;
        Ok(clients.into_iter().map(ClientAccountDto::from).collect())
    }

    pub async fn create_client(&self, dto: CreateClientDto) -> Result<ClientAccountDto> {
        let handle = client_handle(&dto.name);
        if !CLIENT_HANDLE_REGEX.is_match(&handle) {
            return Err(AppError::Validation(
                "Name may only contain letters, digits and spaces".to_string(),
            ));
        }

        let username = client_username(&dto.name);
        let company_name = dto
            .company_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| client_display_name(&handle));

        let password_hash = self.hasher.hash(&dto.password).await?;
        let user = self
            .repository
            .insert(NewAppUser {
                username: username.clone(),
                password_hash,
                role: AppRole::Client,
                company_name: Some(company_name),
            })
            .await
            .map_err(|e| {
                if e.is_conflict() {
                    AppError::Conflict(format!("Username '{}' already exists", username))
                } else {
                    e
                }
            })?;

        tracing::info!("Client account created: {}", user.username);
        Ok(user.into())
    }

    pub async fn delete_client(&self, id: Uuid) -> Result<()> {
        if !self.repository.delete(id, AppRole::Client).await? {
            return Err(AppError::NotFound(format!("Client account {} not found", id)));
        }
        tracing::info!("Client account deleted: {}", id);
        Ok(())
    }

    pub async fn reset_client_password(&self, id: Uuid, dto: ResetPasswordDto) -> Result<()> {
        let client = self
            .repository
            .find_by_id(id)
            .await?
            .filter(|u| u.role == AppRole::Client)
            .ok_or_else(|| AppError::NotFound(format!("Client account {} not found", id)))?;

        let hash = self.hasher.hash(&dto.new_password).await?;
        self.repository.update_password(client.id, &hash).await?;

        tracing::info!("Password reset for {}", client.username);
        Ok(())
    }

    /// Change the password of the manager or inventory account
    pub async fn change_staff_password(
        &self,
        account: StaffAccount,
        dto: ChangePasswordDto,
    ) -> Result<()> {
        if dto.new_password != dto.confirm_password {
            return Err(AppError::Validation("Passwords do not match".to_string()));
        }

        let user = self
            .repository
            .find_by_username(account.username())
            .await?
            .filter(|u| u.role == account.role())
            .ok_or_else(|| {
                AppError::NotFound(format!("Account '{}' not found", account.username()))
            })?;

        let hash = self.hasher.hash(&dto.new_password).await?;
        self.repository.update_password(user.id, &hash).await?;

        tracing::info!("Password changed for {}", user.username);
        Ok(())
    }

    /// Create the fixed admin, manager and inventory accounts when missing.
    /// Returns how many were created.
    pub async fn bootstrap_staff_accounts(&self, password: &str) -> Result<usize> {
        let accounts = [
            (ADMIN_USERNAME, AppRole::Admin),
            (MANAGER_USERNAME, AppRole::Manager),
            (INVENTORY_USERNAME, AppRole::InventoryWorker),
        ];

        let mut created = 0;
        for (username, role) in accounts {
            if self.repository.find_by_username(username).await?.is_some() {
                continue;
            }
            let password_hash = self.hasher.hash(password).await?;
            match self
                .repository
                .insert(NewAppUser {
                    username: username.to_string(),
                    password_hash,
                    role,
                    company_name: None,
                })
                .await
            {
                Ok(_) => {
                    tracing::info!("Bootstrapped '{}' account", username);
                    created += 1;
                }
                // Another instance created it first
                Err(e) if e.is_conflict() => {}
                Err(e) => return Err(e),
            }
        }
        Ok(created)
    }
}
