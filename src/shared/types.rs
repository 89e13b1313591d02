use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::error::{AppError, Result};
use crate::shared::constants::MAX_DATE_RANGE_DAYS;

/// Present-but-null deserializes to `Some(None)`, absent to `None`.
/// Pair with `#[serde(default)]`.
pub fn double_option<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

impl Meta {
    pub fn total(total: usize) -> Self {
        Self {
            total: total as i64,
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

// =============================================================================
// DATE FILTERS
// =============================================================================

/// Single working day selector (`?date=YYYY-MM-DD`)
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct DateQuery {
    /// Working day (YYYY-MM-DD)
    pub date: NaiveDate,
}

/// Inclusive date range (`?from=...&to=...`). A missing `to` means the same day as `from`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct DateRangeQuery {
    /// First day of the range (YYYY-MM-DD)
    pub from: NaiveDate,
    /// Last day of the range, inclusive (YYYY-MM-DD)
    pub to: Option<NaiveDate>,
}

/// Validated inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn single(date: NaiveDate) -> Self {
        Self {
            from: date,
            to: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

impl DateRangeQuery {
    pub fn into_range(self) -> Result<DateRange> {
        let to = self.to.unwrap_or(self.from);
        if to < self.from {
            return Err(AppError::Validation(
                "`to` must not be before `from`".to_string(),
            ));
        }
        if (to - self.from).num_days() > MAX_DATE_RANGE_DAYS {
            return Err(AppError::Validation(format!(
                "Date range cannot exceed {} days",
                MAX_DATE_RANGE_DAYS
            )));
        }
        Ok(DateRange { from: self.from, to })
    }
}
