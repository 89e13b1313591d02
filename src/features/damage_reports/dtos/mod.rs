mod damage_report_dto;

pub use damage_report_dto::*;
