mod company_handler;

pub use company_handler::*;
