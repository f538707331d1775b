use crate::response::ApiResponse;
use crate::store::{DeleteError, QueryError, UpdateError};
use serde_json::json;
use thiserror::Error;

/// Everything that can fail while handling a request.
///
/// The first three variants are detected locally and map to precise 4xx
/// responses with fixed messages. Every store failure collapses to a
/// generic 500 carrying the error detail, with no distinction between
/// causes.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("Invalid JSON format")]
    InvalidJson,
    #[error("'userId' is required")]
    MissingUserId,
    #[error("User not found")]
    NotFound,
    #[error("QueryError: {0}")]
    Query(#[from] QueryError),
    #[error("DeleteError: {0}")]
    Delete(#[from] DeleteError),
    #[error("UpdateError: {0}")]
    Update(#[from] UpdateError),
}

impl HandlerError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidJson | Self::MissingUserId => 400,
            Self::NotFound => 404,
            Self::Query(_) | Self::Delete(_) | Self::Update(_) => 500,
        }
    }

    pub fn into_response(self) -> ApiResponse {
        match self.status_code() {
            500 => ApiResponse::new(
                500,
                json!({ "message": "Internal server error", "error": self.to_string() }),
            ),
            code => ApiResponse::message(code, self.to_string()),
        }
    }
}
