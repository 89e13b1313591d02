use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::damage_reports::models::DamageReport;

/// Multipart form accepted when saving or submitting a damage report.
/// Documentation only; handlers read the parts through `Multipart`.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct DamageFormDto {
    /// What was damaged and how
    #[schema(example = "Fuite sous l'évier du local 3")]
    pub description: String,
    /// Start of the intervention (HH:MM)
    #[schema(example = "08:30")]
    pub start_time: Option<String>,
    /// End of the intervention (HH:MM)
    #[schema(example = "10:00")]
    pub end_time: Option<String>,
    /// Photo before the repair
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub before_photo: Option<String>,
    /// Photo after the repair
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub after_photo: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MoveDraftDto {
    /// New working day for the draft
    pub report_date: NaiveDate,
}

/// The open draft of a day, `null` when none exists
#[derive(Debug, Serialize, ToSchema)]
pub struct DraftResponseDto {
    pub draft: Option<DamageReport>,
}
