//! Exchange model and request payloads

use crate::core::entity::{Entity, Relation};
use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

string_enum! {
    #[derive(Default)]
    pub enum ExchangeStatus {
        #[default]
        Scheduled => "SCHEDULED",
        Confirmed => "CONFIRMED",
        InProgress => "IN_PROGRESS",
        Completed => "COMPLETED",
        Cancelled => "CANCELLED",
    }
}

/// A mentoring session between two users around one skill
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Exchange {
    pub id: i64,
    pub mentor_id: i64,
    pub student_id: i64,
    pub skill_id: i64,
    pub skill_name: Option<String>,
    pub scheduled_date: DateTime<Utc>,
    pub duration_hours: f64,
    #[cfg_attr(feature = "postgres", sqlx(try_from = "String"))]
    pub status: ExchangeStatus,
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
    pub credits_value: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Exchange {
    pub const RELATIONS: &'static [Relation] = &[
        Relation::new("mentor", &["mentor_id"]),
        Relation::new("student", &["student_id"]),
    ];
}

impl Entity for Exchange {
    fn resource_name() -> &'static str {
        "exchanges"
    }

    fn resource_name_singular() -> &'static str {
        "exchange"
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }


    fn indexed_fields() -> &'static [&'static str] {
        &["mentor_id", "student_id", "skill_id"]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "mentor_id" => Some(self.mentor_id.into()),
            "student_id" => Some(self.student_id.into()),
            "skill_id" => Some(self.skill_id.into()),
            _ => None,
        }
    }
}

fn default_duration() -> f64 {
    1.0
}

/// Body of POST and PUT /exchanges
///
/// `skill_name` falls back to the name of the referenced skill. On PUT a
/// missing `status` keeps the current one.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExchangePayload {
    pub mentor_id: i64,
    pub student_id: i64,
    pub skill_id: i64,

    #[validate(length(max = 150))]
    pub skill_name: Option<String>,

    pub scheduled_date: DateTime<Utc>,

    #[serde(default = "default_duration")]
    #[validate(range(exclusive_min = 0.0))]
    pub duration_hours: f64,

    pub status: Option<ExchangeStatus>,

    #[validate(url, length(max = 500))]
    pub meeting_link: Option<String>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,

    #[validate(range(min = 0.0))]
    pub credits_value: Option<f64>,
}

/// Body of PATCH /exchanges/{id}/status: `"CONFIRMED"` or `{"status": "CONFIRMED"}`
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum StatusChange {
    Bare(ExchangeStatus),
    Wrapped { status: ExchangeStatus },
}

impl StatusChange {
    pub fn status(&self) -> ExchangeStatus {
        match *self {
            StatusChange::Bare(status) | StatusChange::Wrapped { status } => status,
        }
    }
}

// Both shapes are fully checked by deserialization.
impl Validate for StatusChange {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}
