mod material_service;

pub use material_service::MaterialService;
