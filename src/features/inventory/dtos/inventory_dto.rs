use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::shared::types::double_option;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateInventoryItemDto {
    #[schema(example = "Disjoncteur 16A")]
    #[validate(length(min = 1, max = 200, message = "Item name must be 1-200 characters"))]
    pub item_name: String,

    #[schema(example = 24, minimum = 0)]
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,

    #[schema(example = "Conteneur B, étagère 3")]
    #[validate(length(max = 200))]
    pub location: Option<String>,

    #[validate(length(max = 100))]
    pub category: Option<String>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// Partial update. Omitted fields are left unchanged and `null` clears a field.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateInventoryItemDto {
    #[validate(length(min = 1, max = 200, message = "Item name must be 1-200 characters"))]
    pub item_name: Option<String>,

    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: Option<i32>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub location: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub category: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct InventorySearchQuery {
    /// Matches item name or location, ignoring case
    pub search: Option<String>,
}
