mod inventory_service;

pub use inventory_service::InventoryService;
