//! Typed error handling for the API
//!
//! Handlers return [`TrocaResult`]. Every error knows its HTTP status and
//! a stable machine-readable code, and renders as
//! `{ "code", "message", "details"? }`.
//!
//! # Error Categories
//!
//! - [`EntityError`]: missing rows and conflicts
//! - [`ValidationError`]: payload and reference problems
//! - [`RequestError`]: malformed request parts
//! - [`AuthError`]: authentication and authorization failures
//! - [`StorageError`]: backend failures
//! - [`ConfigError`]: configuration loading and validation
//!
//! Storage code works with `anyhow::Error`; the `From<anyhow::Error>`
//! conversion recovers the typed errors (and Postgres constraint
//! violations) at the HTTP edge.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type for the API
#[derive(Debug, Error)]
pub enum TrocaError {
    /// Entity-related errors (CRUD operations)
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// HTTP/Request errors
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Authentication and authorization errors
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl TrocaError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            TrocaError::Entity(e) => e.status_code(),
            TrocaError::Validation(e) => e.status_code(),
            TrocaError::Request(_) => StatusCode::BAD_REQUEST,
            TrocaError::Auth(e) => e.status_code(),
            TrocaError::Storage(e) => e.status_code(),
            TrocaError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TrocaError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            TrocaError::Entity(e) => e.error_code(),
            TrocaError::Validation(e) => e.error_code(),
            TrocaError::Request(e) => e.error_code(),
            TrocaError::Auth(e) => e.error_code(),
            TrocaError::Storage(e) => e.error_code(),
            TrocaError::Config(_) => "CONFIG_ERROR",
            TrocaError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            TrocaError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id
                }))
            }
            TrocaError::Entity(EntityError::Conflict {
                constraint: Some(constraint),
                ..
            }) => Some(serde_json::json!({ "constraint": constraint })),
            TrocaError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            TrocaError::Validation(ValidationError::ReferenceNotFound {
                field,
                entity_type,
                id,
            }) => Some(serde_json::json!({
                "field": field,
                "entity_type": entity_type,
                "id": id
            })),
            _ => None,
        }
    }
}

impl IntoResponse for TrocaError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity operations
#[derive(Debug, Error)]
pub enum EntityError {
    /// Entity was not found
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: i64 },

    /// The operation clashes with existing data (duplicate key, row in use)
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
        constraint: Option<String>,
    },
}

impl EntityError {
    pub fn not_found(entity_type: &str, id: i64) -> Self {
        EntityError::NotFound {
            entity_type: entity_type.to_string(),
            id,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        EntityError::Conflict {
            message: message.into(),
            constraint: None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::Conflict { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::Conflict { .. } => "CONFLICT",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Field rule violations
    #[error("Validation errors: {}", summarize(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// A payload id points at a row that does not exist
    #[error("Referenced {entity_type} '{id}' (field '{field}') does not exist")]
    ReferenceNotFound {
        field: String,
        entity_type: String,
        id: i64,
    },

    /// Body could not be parsed into the expected shape
    #[error("Invalid payload: {message}")]
    InvalidPayload { message: String },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

fn summarize(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn reference(field: &str, entity_type: &str, id: i64) -> Self {
        ValidationError::ReferenceNotFound {
            field: field.to_string(),
            entity_type: entity_type.to_string(),
            id,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ValidationError::FieldErrors(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ValidationError::ReferenceNotFound { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ValidationError::InvalidPayload { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::FieldErrors(_) => "VALIDATION_ERROR",
            ValidationError::ReferenceNotFound { .. } => "REFERENCE_NOT_FOUND",
            ValidationError::InvalidPayload { .. } => "INVALID_PAYLOAD",
        }
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, Error)]
pub enum RequestError {
    /// Invalid entity ID format
    #[error("Invalid entity ID format: '{id}'")]
    InvalidEntityId { id: String },

    /// Invalid query string
    #[error("Invalid query: {message}")]
    InvalidQuery { message: String },
}

impl RequestError {
    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidEntityId { .. } => "INVALID_ENTITY_ID",
            RequestError::InvalidQuery { .. } => "INVALID_QUERY",
        }
    }
}

// =============================================================================
// Auth Errors
// =============================================================================

/// Authentication and authorization failures
#[derive(Debug, Error)]
pub enum AuthError {
    /// The route needs a token and none was sent
    #[error("Authentication required")]
    Unauthenticated,

    /// A token was sent but could not be verified
    #[error("Invalid token: {message}")]
    InvalidToken { message: String },

    /// Authenticated, but lacking the required role
    #[error("Forbidden: requires one of [{}]", .required.join(", "))]
    Forbidden { required: Vec<String> },

    /// Login with an unknown e-mail or wrong password
    #[error("Invalid e-mail or password")]
    InvalidCredentials,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Forbidden { .. } => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::Unauthenticated => "UNAUTHORIZED",
            AuthError::InvalidToken { .. } => "INVALID_TOKEN",
            AuthError::Forbidden { .. } => "FORBIDDEN",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Query execution error
    #[error("{backend} query error: {message}")]
    QueryError { backend: String, message: String },

    /// Backend not available
    #[error("Storage backend '{backend}' is unavailable: {message}")]
    Unavailable { backend: String, message: String },
}

impl StorageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StorageError::QueryError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            StorageError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::QueryError { .. } => "STORAGE_ERROR",
            StorageError::Unavailable { .. } => "STORAGE_UNAVAILABLE",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file
    #[error("Failed to parse config{}: {message}", .file.as_deref().map(|f| format!(" file '{}'", f)).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// IO error while reading configuration
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for TrocaError {
    fn from(err: serde_json::Error) -> Self {
        TrocaError::Validation(ValidationError::InvalidPayload {
            message: err.to_string(),
        })
    }
}

impl From<validator::ValidationErrors> for TrocaError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldValidationError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        TrocaError::Validation(ValidationError::FieldErrors(fields))
    }
}

/// Recover typed errors carried through `anyhow` by the storage layer
impl From<anyhow::Error> for TrocaError {
    fn from(err: anyhow::Error) -> Self {
        let err = match err.downcast::<TrocaError>() {
            Ok(e) => return e,
            Err(err) => err,
        };
        let err = match err.downcast::<EntityError>() {
            Ok(e) => return TrocaError::Entity(e),
            Err(err) => err,
        };
        let err = match err.downcast::<ValidationError>() {
            Ok(e) => return TrocaError::Validation(e),
            Err(err) => err,
        };
        #[cfg(feature = "postgres")]
        let err = match err.downcast::<sqlx::Error>() {
            Ok(e) => return from_sqlx(e),
            Err(err) => err,
        };
        TrocaError::Internal(err.to_string())
    }
}

#[cfg(feature = "postgres")]
fn from_sqlx(err: sqlx::Error) -> TrocaError {
    if let sqlx::Error::Database(db) = &err {
        let constraint = db.constraint().map(str::to_string);
        match db.code().as_deref() {
            Some("23503") => {
                return TrocaError::Entity(EntityError::Conflict {
                    message: "row is referenced by, or references, another record".to_string(),
                    constraint,
                });
            }
            Some("23505") => {
                return TrocaError::Entity(EntityError::Conflict {
                    message: "a record with the same unique value already exists".to_string(),
                    constraint,
                });
            }
            _ => {}
        }
    }
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            TrocaError::Storage(StorageError::Unavailable {
                backend: "postgres".to_string(),
                message: err.to_string(),
            })
        }
        other => TrocaError::Storage(StorageError::QueryError {
            backend: "postgres".to_string(),
            message: other.to_string(),
        }),
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for handlers
pub type TrocaResult<T> = Result<T, TrocaError>;
