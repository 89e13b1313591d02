mod company_service;

pub use company_service::{lot_keyword, CompanyService};
