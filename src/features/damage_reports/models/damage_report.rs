use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::shared::lifecycle::{LifecycleState, Snapshot};

/// Damage report status matching the `damage_status` database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "damage_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DamageStatus {
    Draft,
    Submitted,
}

impl std::fmt::Display for DamageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DamageStatus::Draft => write!(f, "draft"),
            DamageStatus::Submitted => write!(f, "submitted"),
        }
    }
}

impl LifecycleState for DamageStatus {
    const RECORD: &'static str = "Damage report";

    fn successors(self) -> &'static [Self] {
        match self {
            DamageStatus::Draft => &[DamageStatus::Draft, DamageStatus::Submitted],
            DamageStatus::Submitted => &[],
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct DamageReport {
    pub id: Uuid,
    pub company_id: i64,
    pub description: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub before_photo_url: Option<String>,
    pub after_photo_url: Option<String>,
    pub status: DamageStatus,
    pub archived: bool,
    pub report_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Form content shared by drafts and submissions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DamageFields {
    pub description: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewDamageDraft {
    pub company_id: i64,
    pub report_date: NaiveDate,
    pub fields: DamageFields,
    pub before_photo_url: Option<String>,
    pub after_photo_url: Option<String>,
}

/// Changes to an open draft. A photo URL of `None` keeps the stored one.
#[derive(Debug, Clone)]
pub struct DraftChanges {
    pub fields: DamageFields,
    pub before_photo_url: Option<String>,
    pub after_photo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct DamageHistory {
    pub id: Uuid,
    pub original_damage_id: Option<Uuid>,
    pub company_id: i64,
    pub description: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub before_photo_url: Option<String>,
    pub after_photo_url: Option<String>,
    pub report_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDamageHistory {
    pub original_damage_id: Option<Uuid>,
    pub company_id: i64,
    pub report_date: NaiveDate,
    pub fields: DamageFields,
    pub before_photo_url: Option<String>,
    pub after_photo_url: Option<String>,
}

impl Snapshot for DamageReport {
    type History = NewDamageHistory;

    fn snapshot(&self) -> NewDamageHistory {
        NewDamageHistory {
            original_damage_id: Some(self.id),
            company_id: self.company_id,
            report_date: self.report_date,
            fields: DamageFields {
                description: self.description.clone(),
                start_time: self.start_time.clone(),
                end_time: self.end_time.clone(),
            },
            before_photo_url: self.before_photo_url.clone(),
            after_photo_url: self.after_photo_url.clone(),
        }
    }
}
