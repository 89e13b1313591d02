mod auth_service;
mod token_service;

pub use auth_service::{AuthService, LoginTarget};
pub use token_service::{IssuedToken, TokenService};
