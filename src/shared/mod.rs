pub mod constants;
pub mod csv_export;
pub mod lifecycle;
pub mod security;
pub mod test_helpers;
pub mod types;
pub mod validation;
