// Aggregation errors and their HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AggregateError {
    /// The store rejected or failed to execute the query. Never retried.
    #[error("query failed: {0}")]
    QueryFailure(#[from] sqlx::Error),

    #[error("bucket width must be a positive number of seconds")]
    InvalidBucketWidth,

    #[error("invalid time range: time_from {from_ms} is after time_to {to_ms}")]
    InvalidRange { from_ms: i64, to_ms: i64 },
}

pub type Result<T, E = AggregateError> = std::result::Result<T, E>;

impl AggregateError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AggregateError::QueryFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AggregateError::InvalidBucketWidth | AggregateError::InvalidRange { .. } => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    /// Message safe to return to callers; store details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AggregateError::QueryFailure(_) => "Error retrieving data".to_string(),
            AggregateError::InvalidBucketWidth | AggregateError::InvalidRange { .. } => {
                self.to_string()
            }
        }
    }
}

impl IntoResponse for AggregateError {
    fn into_response(self) -> Response {
        match &self {
            AggregateError::QueryFailure(e) => tracing::error!(error = %e, "query failure"),
            AggregateError::InvalidBucketWidth | AggregateError::InvalidRange { .. } => {
                tracing::info!("rejected request: {}", self)
            }
        }
        (self.status_code(), self.user_message()).into_response()
    }
}
