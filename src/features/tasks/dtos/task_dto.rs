use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::tasks::rotation::RotationSlot;
use crate::shared::types::double_option;

/// Partial update of a task instance. Omitted fields are left unchanged and
/// `null` clears a field.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateTaskDto {
    pub completed: Option<bool>,

    /// HH:MM
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, example = "08:00")]
    pub start_time: Option<Option<String>>,

    /// HH:MM
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, example = "09:30")]
    pub end_time: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub remarks: Option<Option<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct DayValidationSummary {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub archived_damage_reports: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RotationDto {
    pub date: NaiveDate,
    /// 1..=4
    pub week_number: i16,
    /// French day name, e.g. "lundi"
    pub day_name: String,
}

impl RotationDto {
    pub fn new(date: NaiveDate, slot: RotationSlot) -> Self {
        Self {
            date,
            week_number: slot.week_number,
            day_name: slot.day_name.to_string(),
        }
    }
}
