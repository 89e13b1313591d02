//! Password hashing for lot passwords and application accounts.
//!
//! bcrypt is CPU-bound, so both operations run on the blocking pool.

use crate::core::error::{AppError, Result};

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub async fn hash(&self, password: &str) -> Result<String> {
        let password = password.to_string();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
            .map_err(|e| {
                tracing::error!("Hashing error: {}", e);
                AppError::Internal(format!("Failed to hash password: {}", e))
            })
    }

    /// A missing or malformed hash never verifies.
    pub async fn verify(&self, password: &str, hash: Option<&str>) -> bool {
        let Some(hash) = hash.filter(|h| !h.is_empty()) else {
            return false;
        };
        let password = password.to_string();
        let hash = hash.to_string();
        match tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await {
            Ok(Ok(valid)) => valid,
            Ok(Err(e)) => {
                tracing::warn!("Password verification error: {}", e);
                false
            }
            Err(e) => {
                tracing::error!("Verification task failed: {}", e);
                false
            }
        }
    }
}
