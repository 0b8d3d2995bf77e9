//! In-memory implementation of DataService for testing and development

use crate::core::entity::Entity;
use crate::core::error::EntityError;
use crate::core::field::FieldValue;
use crate::core::query::{Listing, PageRequest};
use crate::core::service::{DataService, HealthCheck};
use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

/// In-memory data service
///
/// Rows are kept in id order; ids start at 1 and are never reused, like a
/// database identity column. Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryDataService<T> {
    table: Arc<RwLock<Table<T>>>,
}

impl<T> InMemoryDataService<T> {
    /// Create a new empty in-memory data service
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }
}

impl<T> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn page_of<T: Clone>(rows: Vec<&T>, page: PageRequest) -> Listing<T> {
    let total = rows.len();
    let items = rows
        .into_iter()
        .skip(page.offset())
        .take(page.limit)
        .cloned()
        .collect();
    Listing::new(items, total)
}

fn ensure_indexed<T: Entity>(field: &str) -> Result<()> {
    if !T::indexed_fields().contains(&field) {
        bail!(
            "Field '{}' is not indexed on {}",
            field,
            T::resource_name()
        );
    }
    Ok(())
}

impl<T: Entity> Table<T> {
    /// Reject `entity` when a unique field value is held by another row
    fn check_unique(&self, entity: &T, own_id: Option<i64>) -> Result<()> {
        for field in T::unique_fields() {
            let Some(value) = entity.field_value(field).filter(|v| !v.is_null()) else {
                continue;
            };
            let taken = self
                .rows
                .iter()
                .any(|(id, row)| {
                    Some(*id) != own_id && row.field_value(field).as_ref() == Some(&value)
                });
            if taken {
                return Err(EntityError::Conflict {
                    message: format!(
                        "a {} with the same {} already exists",
                        T::resource_name_singular(),
                        field
                    ),
                    constraint: Some(format!("uq_{}_{}", T::resource_name(), field)),
                }
                .into());
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<T: Entity> DataService<T> for InMemoryDataService<T> {
    async fn create(&self, mut entity: T) -> Result<T> {
        let mut table = self
            .table
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        table.check_unique(&entity, None)?;
        let id = table.next_id;
        table.next_id += 1;
        entity.set_id(id);
        table.rows.insert(id, entity.clone());

        Ok(entity)
    }

    async fn get(&self, id: i64) -> Result<Option<T>> {
        let table = self
            .table
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(table.rows.get(&id).cloned())
    }

    async fn list(&self, page: PageRequest) -> Result<Listing<T>> {
        let table = self
            .table
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(page_of(table.rows.values().collect(), page))
    }

    async fn find_by(&self, fields: &[&str], value: i64, page: PageRequest) -> Result<Listing<T>> {
        for field in fields {
            ensure_indexed::<T>(field)?;
        }

        let table = self
            .table
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let target = FieldValue::Integer(value);
        let matching = table
            .rows
            .values()
            .filter(|row| {
                fields
                    .iter()
                    .any(|field| row.field_value(field).as_ref() == Some(&target))
            })
            .collect();

        Ok(page_of(matching, page))
    }

    async fn search(&self, field: &str, value: &str) -> Result<Vec<T>> {
        ensure_indexed::<T>(field)?;

        let table = self
            .table
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(table
            .rows
            .values()
            .filter(|row| {
                row.field_value(field)
                    .as_ref()
                    .and_then(FieldValue::as_string)
                    == Some(value)
            })
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, mut entity: T) -> Result<T> {
        let mut table = self
            .table
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if !table.rows.contains_key(&id) {
            return Err(EntityError::not_found(T::resource_name_singular(), id).into());
        }
        table.check_unique(&entity, Some(id))?;
        entity.set_id(id);
        table.rows.insert(id, entity.clone());

        Ok(entity)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut table = self
            .table
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(table.rows.remove(&id).is_some())
    }
}

/// The in-memory backend is always ready
pub struct InMemoryHealth;

#[async_trait]
impl HealthCheck for InMemoryHealth {
    fn name(&self) -> &str {
        "memory"
    }

    async fn check(&self) -> Result<()> {
        Ok(())
    }
}
