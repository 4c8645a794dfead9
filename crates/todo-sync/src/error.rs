//! Error types for todo synchronization

use thiserror::Error;

use crate::inflight::OpKey;
use crate::model::TodoId;

/// Common result type for API calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Failures talking to the remote todo store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The todo does not exist on the server
    #[error("todo not found")]
    NotFound,

    /// The server refused the change because of its current state
    #[error("conflicting update")]
    Conflict,

    /// The request took too long
    #[error("request timed out")]
    Timeout,

    /// The server could not be reached
    #[error("server unreachable: {0}")]
    Unreachable(String),

    /// The server failed while handling the request
    #[error("server error (status {status})")]
    Server {
        /// HTTP status code
        status: u16,
    },

    /// Any other non-success response
    #[error("request rejected (status {status})")]
    Rejected {
        /// HTTP status code
        status: u16,
    },

    /// Response body did not match the todo model
    #[error("unexpected response: {0}")]
    Decode(String),

    /// The configured base URL cannot address the API
    #[error("invalid API url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Map a non-success HTTP status to an error kind
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => ApiError::NotFound,
            409 => ApiError::Conflict,
            408 | 504 => ApiError::Timeout,
            500..=599 => ApiError::Server { status },
            _ => ApiError::Rejected { status },
        }
    }

    /// Whether repeating the same request could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::Timeout | ApiError::Unreachable(_) | ApiError::Server { .. }
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::from_status(status.as_u16())
        } else {
            ApiError::Unreachable(err.to_string())
        }
    }
}

/// Failures of a state manager operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// Todo text was empty after trimming; nothing was sent
    #[error("todo text is empty")]
    EmptyText,

    /// Another operation on the same key has not settled yet
    #[error("{0} is already in progress")]
    Busy(OpKey),

    /// No todo with this id in the local collection
    #[error("unknown todo {0}")]
    UnknownTodo(TodoId),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SyncError {
    /// Whether the UI should report this failure to the user
    pub fn is_reportable(&self) -> bool {
        !matches!(self, SyncError::EmptyText | SyncError::Busy(_))
    }
}
