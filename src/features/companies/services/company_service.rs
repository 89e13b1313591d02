use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::companies::dtos::{CompanyDto, CreateCompanyDto, SetCompanyPasswordDto};
use crate::features::companies::models::Company;
use crate::features::companies::repositories::CompanyRepository;
use crate::shared::security::PasswordHasher;

/// Short login names employees type, mapped to the keyword of their lot name
const LOT_ALIASES: &[(&str, &str)] = &[
    ("electric", "ELECTRICITE"),
    ("clim", "CLIMATISATION"),
    ("plomb", "PLOMBERIE"),
    ("ventil", "VENTILATION"),
    ("menuise", "MENUISERIE"),
    ("peint", "PEINTURE"),
    ("vrd", "VRD"),
    ("ssi", "SSI"),
];

/// Keyword searched for in lot names when an employee logs in with `username`
pub fn lot_keyword(username: &str) -> String {
    let username = username.trim().to_lowercase();
    LOT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == username)
        .map(|(_, keyword)| keyword.to_string())
        .unwrap_or_else(|| username.to_uppercase())
}

pub struct CompanyService {
    repository: Arc<dyn CompanyRepository>,
    hasher: PasswordHasher,
}

impl CompanyService {
    pub fn new(repository: Arc<dyn CompanyRepository>, hasher: PasswordHasher) -> Self {
        Self { repository, hasher }
    }

    pub async fn list(&self) -> Result<Vec<CompanyDto>> {
        let companies = self.repository.list().await?;
        Ok(companies.into_iter().map(CompanyDto::from).collect())
    }

    pub async fn get(&self, id: i64) -> Result<Company> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Company {} not found", id)))
    }

    pub async fn create(&self, dto: CreateCompanyDto) -> Result<CompanyDto> {
        let name = dto.name.trim().to_uppercase();
        if name.is_empty() {
            return Err(AppError::Validation("Name must not be blank".to_string()));
        }

        let company = self.repository.create(&name).await.map_err(|e| {
            if e.is_conflict() {
                AppError::Conflict(format!("Lot '{}' already exists", name))
            } else {
                e
            }
        })?;

        tracing::info!("Lot created: id={}, name={}", company.id, company.name);
        Ok(company.into())
    }

    pub async fn set_password(&self, id: i64, dto: SetCompanyPasswordDto) -> Result<()> {
        let company = self.get(id).await?;
        let hash = self.hasher.hash(&dto.password).await?;
        self.repository.upsert_password(company.id, &hash).await?;

        tracing::info!("Employee password updated for {}", company.name);
        Ok(())
    }

    /// Lot whose name contains the keyword derived from `username`
    pub async fn find_for_login(&self, username: &str) -> Result<Option<Company>> {
        let keyword = lot_keyword(username);
        if keyword.is_empty() {
            return Ok(None);
        }
        let companies = self.repository.list().await?;
        Ok(companies
            .into_iter()
            .find(|c| c.name.to_uppercase().contains(&keyword)))
    }

    /// Check an employee password against the lot's stored hash. A lot with no
    /// password set never authenticates.
    pub async fn verify_password(&self, company_id: i64, password: &str) -> Result<bool> {
        let hash = self.repository.password_hash(company_id).await?;
        Ok(self.hasher.verify(password, hash.as_deref()).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::companies::repositories::MemoryCompanyRepository;

    fn service() -> CompanyService {
        CompanyService::new(
            Arc::new(MemoryCompanyRepository::seeded()),
            PasswordHasher::new(4),
        )
    }

    #[test]
    fn test_lot_keyword_aliases() {
        assert_eq!(lot_keyword("electric"), "ELECTRICITE");
        assert_eq!(lot_keyword("Plomb"), "PLOMBERIE");
        assert_eq!(lot_keyword(" ssi "), "SSI");
        assert_eq!(lot_keyword("peinture"), "PEINTURE");
        assert_eq!(lot_keyword("etancheite"), "ETANCHEITE");
    }

    #[tokio::test]
    async fn test_find_for_login_matches_by_substring() {
        let service = service();

        let lot = service.find_for_login("clim").await.unwrap().unwrap();
        assert_eq!(lot.name, "LOT CLIMATISATION");

        let lot = service.find_for_login("vrd").await.unwrap().unwrap();
        assert_eq!(lot.id, 7);

        assert!(service.find_for_login("charpente").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_password_must_be_set_before_login() {
        let service = service();
        assert!(!service.verify_password(3, "secret1").await.unwrap());

        service
            .set_password(
                3,
                SetCompanyPasswordDto {
                    password: "secret1".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(service.verify_password(3, "secret1").await.unwrap());
        assert!(!service.verify_password(3, "secret2").await.unwrap());
    }

    #[tokio::test]
    async fn test_create_uppercases_and_rejects_duplicates() {
        let service = service();
        let created = service
            .create(CreateCompanyDto {
                name: " lot etancheite ".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.name, "LOT ETANCHEITE");
        assert_eq!(created.id, 9);

        let err = service
            .create(CreateCompanyDto {
                name: "LOT ETANCHEITE".to_string(),
            })
            .await
            .unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_set_password_on_unknown_lot() {
        let err = service()
            .set_password(
                42,
                SetCompanyPasswordDto {
                    password: "secret1".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
