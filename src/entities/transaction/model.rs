//! Transaction model and request payload

use crate::core::entity::{Entity, Relation};
use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

string_enum! {
    #[derive(Default)]
    pub enum TransactionKind {
        #[default]
        SessionPayment => "SESSION_PAYMENT",
        Adjustment => "ADJUSTMENT",
        SignupBonus => "SIGNUP_BONUS",
        ReferralBonus => "REFERRAL_BONUS",
    }
}

string_enum! {
    #[derive(Default)]
    pub enum TransactionStatus {
        #[default]
        Pending => "PENDING",
        Completed => "COMPLETED",
        Refunded => "REFUNDED",
    }
}

/// A movement of time credits between two users
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Transaction {
    pub id: i64,
    pub exchange_id: Option<i64>,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub credits: f64,
    #[serde(rename = "type")]
    #[cfg_attr(feature = "postgres", sqlx(try_from = "String"))]
    pub kind: TransactionKind,
    pub description: Option<String>,
    #[cfg_attr(feature = "postgres", sqlx(try_from = "String"))]
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// `/transactions/user/{id}` matches either side of the transfer
    pub const RELATIONS: &'static [Relation] =
        &[Relation::new("user", &["sender_id", "recipient_id"])];
}

impl Entity for Transaction {
    fn resource_name() -> &'static str {
        "transactions"
    }

    fn resource_name_singular() -> &'static str {
        "transaction"
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }


    fn indexed_fields() -> &'static [&'static str] {
        &["sender_id", "recipient_id", "exchange_id"]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "sender_id" => Some(self.sender_id.into()),
            "recipient_id" => Some(self.recipient_id.into()),
            "exchange_id" => Some(self.exchange_id.into()),
            _ => None,
        }
    }
}

/// Body of POST and PUT /transactions
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TransactionPayload {
    pub exchange_id: Option<i64>,
    pub sender_id: i64,
    pub recipient_id: i64,

    #[validate(range(exclusive_min = 0.0))]
    pub credits: f64,

    #[serde(rename = "type", default)]
    pub kind: TransactionKind,

    #[validate(length(max = 500))]
    pub description: Option<String>,

    pub status: Option<TransactionStatus>,
}
