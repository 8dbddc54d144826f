//! Domain error types for the file bridge.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.
//! Every variant displays as its bare message so the message can be sent verbatim as
//! the plain-text body of an error response.

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};
use std::io;

/// Errors signalled by a storage backend while fetching a file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The path does not correspond to an existing remote resource
    #[error("{0}")]
    NotFound(String),

    /// Connectivity, permission or I/O fault on the backend side
    #[error("{0}")]
    Failed(String),
}

impl From<io::Error> for FetchError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => FetchError::NotFound(err.to_string()),
            _ => FetchError::Failed(err.to_string()),
        }
    }
}

/// Request-level errors surfaced by the bridge handler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    /// The routing prefix is missing from the request path
    #[error("{0}")]
    Routing(String),

    /// The request URL or a query value cannot be used as given
    #[error("{0}")]
    InvalidRequest(String),

    /// Backend resource absent
    #[error("{0}")]
    NotFound(String),

    /// Any other backend failure
    #[error("{0}")]
    Backend(String),
}

impl BridgeError {
    /// Whether this error is surfaced as "not found" rather than an internal failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BridgeError::NotFound(_))
    }
}

impl From<FetchError> for BridgeError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::NotFound(msg) => BridgeError::NotFound(msg),
            FetchError::Failed(msg) => BridgeError::Backend(msg),
        }
    }
}

impl ResponseError for BridgeError {
    fn status_code(&self) -> StatusCode {
        match self {
            BridgeError::NotFound(_) => StatusCode::NOT_FOUND,
            BridgeError::Routing(_) | BridgeError::InvalidRequest(_) | BridgeError::Backend(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(self.to_string())
    }
}

/// Convenience type alias for Results with BridgeError.
pub type BridgeResult<T> = Result<T, BridgeError>;
