use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMaterialRequestDto {
    #[schema(example = "Câble R2V 3G2.5")]
    #[validate(length(min = 1, max = 200, message = "Material name must be 1-200 characters"))]
    pub material_name: String,

    #[schema(example = 50, minimum = 1)]
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetFulfilledDto {
    pub fulfilled: bool,
}
