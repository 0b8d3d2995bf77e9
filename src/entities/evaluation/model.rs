//! Evaluation model and request payloads

use crate::core::entity::{Entity, Relation};
use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A rating left by one participant of an exchange about the other
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Evaluation {
    pub id: i64,
    pub exchange_id: i64,
    pub evaluator_id: i64,
    pub evaluated_id: i64,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Evaluation {
    pub const RELATIONS: &'static [Relation] = &[
        Relation::new("evaluated", &["evaluated_id"]),
        Relation::new("exchange", &["exchange_id"]),
    ];
}

impl Entity for Evaluation {
    fn resource_name() -> &'static str {
        "evaluations"
    }

    fn resource_name_singular() -> &'static str {
        "evaluation"
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }


    fn indexed_fields() -> &'static [&'static str] {
        &["exchange_id", "evaluator_id", "evaluated_id"]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "exchange_id" => Some(self.exchange_id.into()),
            "evaluator_id" => Some(self.evaluator_id.into()),
            "evaluated_id" => Some(self.evaluated_id.into()),
            _ => None,
        }
    }
}

/// POST /evaluations
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewEvaluation {
    pub exchange_id: i64,
    pub evaluator_id: i64,
    pub evaluated_id: i64,

    #[validate(range(min = 1, max = 5))]
    pub rating: i32,

    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

/// PUT /evaluations/{id}; participants are fixed once created
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct EvaluationUpdate {
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,

    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}
