//! Postgres row mapping for User

use super::model::User;
use crate::storage::postgres::{PgQueryAs, PgRecord};

impl PgRecord for User {
    const TABLE: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &[
        "full_name",
        "email",
        "password_hash",
        "role",
        "bio",
        "avatar_url",
        "time_credits",
        "total_sessions_given",
        "total_sessions_taken",
        "average_rating",
        "location",
        "timezone",
        "linkedin_url",
        "created_at",
        "updated_at",
    ];

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(&self.full_name)
            .bind(&self.email)
            .bind(&self.password_hash)
            .bind(self.role.as_str())
            .bind(&self.bio)
            .bind(&self.avatar_url)
            .bind(self.time_credits)
            .bind(self.total_sessions_given)
            .bind(self.total_sessions_taken)
            .bind(self.average_rating)
            .bind(&self.location)
            .bind(&self.timezone)
            .bind(&self.linkedin_url)
            .bind(self.created_at)
            .bind(self.updated_at)
    }
}
