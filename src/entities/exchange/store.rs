//! Postgres row mapping for Exchange

use super::model::Exchange;
use crate::storage::postgres::{PgQueryAs, PgRecord};

impl PgRecord for Exchange {
    const TABLE: &'static str = "exchanges";
    const COLUMNS: &'static [&'static str] = &[
        "mentor_id",
        "student_id",
        "skill_id",
        "skill_name",
        "scheduled_date",
        "duration_hours",
        "status",
        "meeting_link",
        "notes",
        "credits_value",
        "created_at",
    ];

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.mentor_id)
            .bind(self.student_id)
            .bind(self.skill_id)
            .bind(&self.skill_name)
            .bind(self.scheduled_date)
            .bind(self.duration_hours)
            .bind(self.status.as_str())
            .bind(&self.meeting_link)
            .bind(&self.notes)
            .bind(self.credits_value)
            .bind(self.created_at)
    }
}
