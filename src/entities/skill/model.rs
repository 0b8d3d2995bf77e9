//! Skill model and request payload

use crate::core::entity::{Entity, Relation};
use crate::core::field::FieldValue;
use crate::core::validation::not_blank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

string_enum! {
    #[derive(Default)]
    pub enum SkillCategory {
        Technology => "TECHNOLOGY",
        Design => "DESIGN",
        Business => "BUSINESS",
        Languages => "LANGUAGES",
        Marketing => "MARKETING",
        Data => "DATA",
        Creativity => "CREATIVITY",
        SoftSkills => "SOFT_SKILLS",
        #[default]
        Other => "OTHER",
    }
}

string_enum! {
    #[derive(Default)]
    pub enum SkillLevel {
        #[default]
        Beginner => "BEGINNER",
        Intermediate => "INTERMEDIATE",
        Advanced => "ADVANCED",
        Expert => "EXPERT",
    }
}

/// Something a user teaches or wants to learn
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Skill {
    pub id: i64,
    pub name: String,
    #[cfg_attr(feature = "postgres", sqlx(try_from = "String"))]
    pub category: SkillCategory,
    pub description: Option<String>,
    #[cfg_attr(feature = "postgres", sqlx(try_from = "String"))]
    pub level: SkillLevel,
    pub is_offering: bool,
    pub is_seeking: bool,
    pub hourly_rate: Option<f64>,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Skill {
    /// `/skills/user/{id}`
    pub const RELATIONS: &'static [Relation] = &[Relation::new("user", &["user_id"])];
}

impl Entity for Skill {
    fn resource_name() -> &'static str {
        "skills"
    }

    fn resource_name_singular() -> &'static str {
        "skill"
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }


    fn indexed_fields() -> &'static [&'static str] {
        &["user_id"]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "user_id" => Some(self.user_id.into()),
            _ => None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Body of POST and PUT /skills
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SkillPayload {
    #[validate(length(min = 1, max = 150), custom(function = "not_blank"))]
    pub name: String,

    #[serde(default)]
    pub category: SkillCategory,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[serde(default)]
    pub level: SkillLevel,

    #[serde(default = "default_true")]
    pub is_offering: bool,

    #[serde(default)]
    pub is_seeking: bool,

    #[validate(range(min = 0.0))]
    pub hourly_rate: Option<f64>,

    pub user_id: i64,
}
