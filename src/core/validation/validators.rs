//! Custom field rules used with `#[validate(custom(function = ...))]`

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;
use validator::ValidationError;

/// Rejects strings that are empty after trimming
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}

/// Accepts IANA-style zone names such as `America/Sao_Paulo` or `UTC`
pub fn iana_timezone(value: &str) -> Result<(), ValidationError> {
    static TZ_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = TZ_REGEX.get_or_init(|| {
        Regex::new(r"^(UTC|GMT|[A-Z][A-Za-z_]+(/[A-Za-z0-9_+\-]+){1,2})$").expect("valid timezone regex")
    });
    if regex.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("timezone")
            .with_message(Cow::Borrowed("must be a zone name like 'America/Sao_Paulo'")))
    }
}
