//! User model and request payloads

use crate::core::entity::Entity;
use crate::core::field::FieldValue;
use crate::core::validation::{iana_timezone, not_blank};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Credits granted to every new account unless the payload says otherwise
pub const DEFAULT_TIME_CREDITS: f64 = 10.0;

string_enum! {
    #[derive(Default)]
    pub enum UserRole {
        Admin => "ADMIN",
        #[default]
        User => "USER",
    }
}

/// A marketplace member
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub email: String,

    /// Argon2 PHC string
    #[serde(skip_serializing)]
    pub password_hash: String,

    #[cfg_attr(feature = "postgres", sqlx(try_from = "String"))]
    pub role: UserRole,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub time_credits: f64,
    pub total_sessions_given: i32,
    pub total_sessions_taken: i32,
    pub average_rating: f64,
    pub location: Option<String>,
    pub timezone: Option<String>,
    pub linkedin_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for User {
    fn resource_name() -> &'static str {
        "users"
    }

    fn resource_name_singular() -> &'static str {
        "user"
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }


    fn indexed_fields() -> &'static [&'static str] {
        &["email"]
    }

    fn unique_fields() -> &'static [&'static str] {
        &["email"]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "email" => Some(self.email.as_str().into()),
            _ => None,
        }
    }
}

/// POST /users
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = 150), custom(function = "not_blank"))]
    pub full_name: String,

    #[validate(email, length(max = 100))]
    pub email: String,

    #[validate(length(min = 6, max = 255))]
    pub password: String,

    pub role: Option<UserRole>,

    #[validate(length(max = 500))]
    pub bio: Option<String>,

    #[validate(url, length(max = 255))]
    pub avatar_url: Option<String>,

    #[validate(length(max = 100))]
    pub location: Option<String>,

    #[validate(length(max = 100), custom(function = "iana_timezone"))]
    pub timezone: Option<String>,

    #[validate(url, length(max = 255))]
    pub linkedin_url: Option<String>,

    #[validate(range(min = 0.0))]
    pub time_credits: Option<f64>,
}

/// PUT /users/{id}
///
/// Counters and credits are not editable; the password only changes when
/// one is sent.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserUpdate {
    #[validate(length(min = 1, max = 150), custom(function = "not_blank"))]
    pub full_name: String,

    #[validate(email, length(max = 100))]
    pub email: String,

    #[validate(length(min = 6, max = 255))]
    pub password: Option<String>,

    pub role: Option<UserRole>,

    #[validate(length(max = 500))]
    pub bio: Option<String>,

    #[validate(url, length(max = 255))]
    pub avatar_url: Option<String>,

    #[validate(length(max = 100))]
    pub location: Option<String>,

    #[validate(length(max = 100), custom(function = "iana_timezone"))]
    pub timezone: Option<String>,

    #[validate(url, length(max = 255))]
    pub linkedin_url: Option<String>,
}
