use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::UserRepository;
use crate::core::error::{AppError, Result};
use crate::features::users::models::{AppRole, AppUser, NewAppUser};

#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<AppUser>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<AppUser>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AppUser>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn list_by_role(&self, role: AppRole) -> Result<Vec<AppUser>> {
        let mut users: Vec<AppUser> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.role == role)
            .cloned()
            .collect();
        users.reverse();
        Ok(users)
    }

    async fn insert(&self, user: NewAppUser) -> Result<AppUser> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == user.username) {
            return Err(AppError::Conflict(
                "Duplicate record (app_users_username_key)".to_string(),
            ));
        }
        let now = Utc::now();
        let created = AppUser {
            id: Uuid::now_v7(),
            username: user.username,
            password_hash: user.password_hash,
            role: user.role,
            company_name: user.company_name,
            created_at: now,
            updated_at: now,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool> {
        let mut users = self.users.lock().unwrap();
        match users.iter_mut().find(|u| u.id == id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid, role: AppRole) -> Result<bool> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| !(u.id == id && u.role == role));
        Ok(users.len() < before)
    }
}
