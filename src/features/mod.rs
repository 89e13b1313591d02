pub mod attendance;
pub mod auth;
pub mod companies;
pub mod damage_reports;
pub mod dashboard;
pub mod inventory;
pub mod materials;
pub mod tasks;
pub mod tickets;
pub mod users;
