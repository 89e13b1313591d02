use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::auth::model::AuthenticatedUser;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    /// `admin`, `manager`, `inventory`, `client_<name>` or a lot name/alias
    #[validate(length(min = 1, max = 100, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponseDto {
    /// HS256 access token
    pub access_token: String,
    /// Always "Bearer"
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user: MeResponseDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponseDto {
    pub id: String,
    pub username: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    pub display_name: String,
}

impl From<AuthenticatedUser> for MeResponseDto {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            id: user.sub,
            username: user.username,
            role: user.role,
            company_id: user.company_id,
            display_name: user.display_name,
        }
    }
}
