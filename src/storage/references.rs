//! Delete rules between resources
//!
//! These mirror the `ON DELETE` clauses of the Postgres schema so that both
//! backends answer a DELETE the same way:
//!
//! | deleted  | dependents                                   | rule     |
//! |----------|----------------------------------------------|----------|
//! | user     | exchanges, evaluations, transactions         | RESTRICT |
//! | user     | skills                                       | CASCADE  |
//! | skill    | exchanges                                    | CASCADE  |
//! | exchange | evaluations                                  | CASCADE  |
//! | exchange | transactions (`exchange_id`)                 | SET NULL |

use super::Stores;
use crate::core::entity::Entity;
use crate::core::error::EntityError;
use crate::core::query::PageRequest;
use crate::core::service::DataService;
use anyhow::Result;
use std::sync::Arc;

const BATCH: usize = 100;

/// Every row of `T` whose `fields` reference `id`
async fn referencing<T: Entity>(
    store: &Arc<dyn DataService<T>>,
    fields: &[&str],
    id: i64,
) -> Result<Vec<T>> {
    let mut rows = Vec::new();
    let mut page = 1;
    loop {
        let listing = store.find_by(fields, id, PageRequest::new(page, BATCH)).await?;
        let fetched = listing.items.len();
        rows.extend(listing.items);
        if fetched < BATCH {
            return Ok(rows);
        }
        page += 1;
    }
}

/// Fail with 409 while any row of `T` still references `parent` `id`
async fn restrict<T: Entity>(
    store: &Arc<dyn DataService<T>>,
    fields: &[&str],
    parent: &str,
    id: i64,
) -> Result<()> {
    let listing = store.find_by(fields, id, PageRequest::new(1, 1)).await?;
    if listing.total > 0 {
        tracing::debug!(parent, id, dependents = T::resource_name(), "delete restricted");
        return Err(EntityError::Conflict {
            message: format!(
                "{} {} is still referenced by {} {}",
                parent,
                id,
                listing.total,
                T::resource_name()
            ),
            constraint: Some(format!("fk_{}_{}", T::resource_name(), parent)),
        }
        .into());
    }
    Ok(())
}

impl Stores {
    /// Check and apply the delete rules of user `id`
    pub async fn release_user(&self, id: i64) -> Result<()> {
        restrict(&self.exchanges, &["mentor_id", "student_id"], "user", id).await?;
        restrict(&self.evaluations, &["evaluator_id", "evaluated_id"], "user", id).await?;
        restrict(&self.transactions, &["sender_id", "recipient_id"], "user", id).await?;

        for skill in referencing(&self.skills, &["user_id"], id).await? {
            self.release_skill(skill.id).await?;
            self.skills.delete(skill.id).await?;
        }
        Ok(())
    }

    /// Remove the exchanges of skill `id`
    pub async fn release_skill(&self, id: i64) -> Result<()> {
        for exchange in referencing(&self.exchanges, &["skill_id"], id).await? {
            self.release_exchange(exchange.id).await?;
            self.exchanges.delete(exchange.id).await?;
        }
        Ok(())
    }

    /// Remove the evaluations of exchange `id` and detach its transactions
    pub async fn release_exchange(&self, id: i64) -> Result<()> {
        for evaluation in referencing(&self.evaluations, &["exchange_id"], id).await? {
            self.evaluations.delete(evaluation.id).await?;
        }
        for mut transaction in referencing(&self.transactions, &["exchange_id"], id).await? {
            transaction.exchange_id = None;
            self.transactions.update(transaction.id, transaction).await?;
        }
        Ok(())
    }
}
