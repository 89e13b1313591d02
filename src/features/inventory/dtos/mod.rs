mod inventory_dto;

pub use inventory_dto::{CreateInventoryItemDto, InventorySearchQuery, UpdateInventoryItemDto};
