//! Entity trait defining the core abstraction for all stored records

use crate::core::field::FieldValue;

/// Base trait for every record exposed by the API.
///
/// Identity is a storage-assigned integer. The trait also exposes a small
/// amount of reflection (`field_value`, `indexed_fields`) so that generic
/// storage backends can answer lookups such as "all skills of user 3"
/// without knowing the concrete type.
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g., "users", "skills")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "user", "skill")
    fn resource_name_singular() -> &'static str;

    /// Get the identifier for this entity instance (0 until stored)
    fn id(&self) -> i64;

    /// Assign the identifier, called by storage on insert
    fn set_id(&mut self, id: i64);

    /// Fields that storage backends accept for `find_by` and `search`
    fn indexed_fields() -> &'static [&'static str];

    /// Get the value of an indexed field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Indexed fields no two rows may share (nulls excepted)
    fn unique_fields() -> &'static [&'static str] {
        &[]
    }
}

/// A nested listing route such as `/skills/user/{id}`.
///
/// `segment` is the path segment after the resource name and `fields`
/// the reference columns matched against the id (combined with OR).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    pub segment: &'static str,
    pub fields: &'static [&'static str],
}

impl Relation {
    pub const fn new(segment: &'static str, fields: &'static [&'static str]) -> Self {
        Self { segment, fields }
    }
}
