use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, Claims};

/// Signed access token with its lifetime
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: i64,
}

/// Issues HS256 access tokens for logged-in principals
pub struct TokenService {
    encoding_key: EncodingKey,
    issuer: String,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
            ttl: config.token_ttl,
        }
    }

    pub fn issue(&self, user: &AuthenticatedUser) -> Result<IssuedToken> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AppError::Internal(format!("System clock before epoch: {}", e)))?
            .as_secs();

        let claims = Claims {
            sub: user.sub.clone(),
            iss: self.issuer.clone(),
            iat: now,
            exp: now + self.ttl.as_secs(),
            username: user.username.clone(),
            role: user.role.clone(),
            company_id: user.company_id,
            name: user.display_name.clone(),
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!("Failed to sign access token: {}", e);
                AppError::Internal(format!("Failed to sign access token: {}", e))
            })?;

        Ok(IssuedToken {
            access_token,
            expires_in: self.ttl.as_secs() as i64,
        })
    }
}
