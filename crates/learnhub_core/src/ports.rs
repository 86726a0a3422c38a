//! crates/learnhub_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of where course data comes from, where the session record
//! is kept, and how a route transition is performed.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// One rejected form field and the message to show next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Malformed course source: {0}")]
    MalformedSource(String),
    #[error("Validation failed: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Where the raw course collection is read from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Reads the whole source. Called once per catalog lifetime.
    async fn read_source(&self) -> PortResult<Vec<u8>>;

    /// A human-readable name for logs, e.g. a file path.
    fn describe(&self) -> String;
}

/// A key-value store holding the serialized session record.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> PortResult<Option<String>>;

    async fn set(&self, key: &str, value: String) -> PortResult<()>;

    async fn remove(&self, key: &str) -> PortResult<()>;
}

/// The route-transition side effect invoked after login, logout and purchase.
pub trait Navigator: Send + Sync {
    fn redirect(&self, path: &str);
}
