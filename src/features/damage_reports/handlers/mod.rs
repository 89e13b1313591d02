mod damage_report_handler;

pub use damage_report_handler::*;
