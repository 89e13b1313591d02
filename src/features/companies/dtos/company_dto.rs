use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::companies::models::Company;
use crate::shared::constants::MIN_PASSWORD_LENGTH;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCompanyDto {
    /// Lot name, stored uppercased (e.g. "LOT ETANCHEITE")
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SetCompanyPasswordDto {
    #[validate(length(min = MIN_PASSWORD_LENGTH, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CompanyDto {
    pub id: i64,
    pub name: String,
}

impl From<Company> for CompanyDto {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            name: company.name,
        }
    }
}
