use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use super::CompanyRepository;
use crate::core::error::{AppError, Result};
use crate::features::companies::models::Company;

/// In-memory lots, seeded with the eight standard lots
pub struct MemoryCompanyRepository {
    companies: Mutex<Vec<Company>>,
    passwords: Mutex<HashMap<i64, String>>,
}

impl MemoryCompanyRepository {
    pub fn seeded() -> Self {
        let names = [
            "LOT ELECTRICITE",
            "LOT CLIMATISATION",
            "LOT PLOMBERIE",
            "LOT VENTILATION",
            "LOT MENUISERIE",
            "LOT PEINTURE",
            "LOT VRD",
            "LOT SSI",
        ];
        let companies = names
            .iter()
            .enumerate()
            .map(|(i, name)| Company {
                id: i as i64 + 1,
                name: name.to_string(),
                created_at: Utc::now(),
            })
            .collect();

        Self {
            companies: Mutex::new(companies),
            passwords: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl CompanyRepository for MemoryCompanyRepository {
    async fn list(&self) -> Result<Vec<Company>> {
        Ok(self.companies.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Company>> {
        Ok(self
            .companies
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn create(&self, name: &str) -> Result<Company> {
        let mut companies = self.companies.lock().unwrap();
        if companies.iter().any(|c| c.name == name) {
            return Err(AppError::Conflict("Duplicate record (companies_name_key)".to_string()));
        }
        let company = Company {
            id: companies.iter().map(|c| c.id).max().unwrap_or(0) + 1,
            name: name.to_string(),
            created_at: Utc::now(),
        };
        companies.push(company.clone());
        Ok(company)
    }

    async fn password_hash(&self, company_id: i64) -> Result<Option<String>> {
        Ok(self.passwords.lock().unwrap().get(&company_id).cloned())
    }

    async fn upsert_password(&self, company_id: i64, password_hash: &str) -> Result<()> {
        self.passwords
            .lock()
            .unwrap()
            .insert(company_id, password_hash.to_string());
        Ok(())
    }
}
