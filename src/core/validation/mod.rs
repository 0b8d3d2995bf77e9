//! Request payload validation
//!
//! Payload structs derive `validator::Validate`; handlers receive them
//! through [`ValidatedJson`], which turns malformed bodies into 400 and rule
//! violations into 422 responses.

pub mod extractor;
pub mod validators;

pub use extractor::ValidatedJson;
pub use validators::{iana_timezone, not_blank};
