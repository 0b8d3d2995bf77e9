//! Postgres row mapping for Skill

use super::model::Skill;
use crate::storage::postgres::{PgQueryAs, PgRecord};

impl PgRecord for Skill {
    const TABLE: &'static str = "skills";
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "category",
        "description",
        "level",
        "is_offering",
        "is_seeking",
        "hourly_rate",
        "user_id",
        "created_at",
    ];

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(&self.name)
            .bind(self.category.as_str())
            .bind(&self.description)
            .bind(self.level.as_str())
            .bind(self.is_offering)
            .bind(self.is_seeking)
            .bind(self.hourly_rate)
            .bind(self.user_id)
            .bind(self.created_at)
    }
}
