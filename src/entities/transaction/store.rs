//! Postgres row mapping for Transaction

use super::model::Transaction;
use crate::storage::postgres::{PgQueryAs, PgRecord};

impl PgRecord for Transaction {
    const TABLE: &'static str = "transactions";
    const COLUMNS: &'static [&'static str] = &[
        "exchange_id",
        "sender_id",
        "recipient_id",
        "credits",
        "kind",
        "description",
        "status",
        "created_at",
    ];

    fn bind_columns<'q>(&'q self, query: PgQueryAs<'q, Self>) -> PgQueryAs<'q, Self> {
        query
            .bind(self.exchange_id)
            .bind(self.sender_id)
            .bind(self.recipient_id)
            .bind(self.credits)
            .bind(self.kind.as_str())
            .bind(&self.description)
            .bind(self.status.as_str())
            .bind(self.created_at)
    }
}
