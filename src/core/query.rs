//! Query parameters and pagination utilities

use crate::config::PaginationConfig;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Query parameters for paged listings
///
/// Both parameters are optional; missing values fall back to the
/// configured defaults. `tamanho` is accepted as an alias of `limit`.
/// Out-of-range numbers (negative, or too large for any page) are clamped
/// rather than rejected.
///
/// # Example
/// ```text
/// GET /api/v1/skills?page=2&limit=10
/// GET /api/v1/skills?page=2&tamanho=10
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct QueryParams {
    /// Page number (starts at 1)
    #[serde(deserialize_with = "lenient_integer")]
    pub page: Option<i64>,

    /// Number of items per page
    #[serde(alias = "tamanho", deserialize_with = "lenient_integer")]
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInteger {
    Number(i64),
    Text(String),
}

/// Parse a decimal integer, saturating at the `i64` bounds
fn saturating_parse(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(match digits.parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    })
}

fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawInteger>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawInteger::Number(n)) => Ok(Some(n)),
        Some(RawInteger::Text(text)) => saturating_parse(&text)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid integer '{}'", text))),
    }
}

fn to_count(value: i64) -> usize {
    usize::try_from(value.max(0)).unwrap_or(usize::MAX)
}

/// Largest offset a backend can bind (Postgres OFFSET is a BIGINT)
fn max_offset() -> usize {
    usize::try_from(i64::MAX).unwrap_or(usize::MAX)
}

impl QueryParams {
    /// Resolve the parameters against the configured defaults
    pub fn resolve(&self, config: &PaginationConfig) -> PageRequest {
        let max = config.max_limit.max(1);
        let limit = self
            .limit
            .map_or(config.default_limit, to_count)
            .clamp(1, max);
        PageRequest::new(self.page.map_or(1, to_count), limit)
    }
}

/// A validated page window
///
/// `page` is capped so that `offset()` always fits in an `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl PageRequest {
    pub fn new(page: usize, limit: usize) -> Self {
        let limit = limit.max(1);
        let last_page = max_offset() / limit + 1;
        Self {
            page: page.clamp(1, last_page),
            limit,
        }
    }

    /// Number of rows to skip
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// One page of rows plus the total number of matching rows
#[derive(Debug, Clone)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> Listing<T> {
    pub fn new(items: Vec<T>, total: usize) -> Self {
        Self { items, total }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items
    pub total: usize,

    /// Total number of pages
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let limit = limit.max(1);
        let page = page.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(limit) };
        let start = page.saturating_sub(1).saturating_mul(limit);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: start.saturating_add(limit) < total,
            has_prev: page > 1,
        }
    }
}
