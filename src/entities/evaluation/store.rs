//! Postgres row mapping for Evaluation

use super::model::Evaluation;
use crate::storage::postgres::{PgQueryAs, PgRecord};

impl PgRecord for Evaluation {
    const TABLE: &'static str = "evaluations";
    const COLUMNS: &'static [&'static str] = &[
        "exchange_id",
        "evaluator_id",
        "evaluated_id",
        "rating",
        "comment",
        "created_at",
    ];

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.exchange_id)
            .bind(self.evaluator_id)
            .bind(self.evaluated_id)
            .bind(self.rating)
            .bind(&self.comment)
            .bind(self.created_at)
    }
}
