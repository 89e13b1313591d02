use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AttendanceDto {
    /// Name as typed by the employee; trimmed before use
    #[schema(example = "Marie Curie")]
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub employee_name: String,
}
