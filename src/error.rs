/**
 * API Errors
 * Every failure a handler can report, and how it is rendered over HTTP
 */
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::store::StoreError;
use crate::validation::ValidationError;

/// Error body for rejected parameters and server faults.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),

    #[error("Parameter \"{0}\" of value \"NULL\" violated a constraint \"This value should not be null.\"")]
    MissingParameter(&'static str),

    #[error("Wrong parameters, please provide value for ID parameter")]
    MissingIdentifier,

    #[error("Bad request, please add id parameter to point certain post.")]
    MissingDeleteId,

    #[error("No data found for current ID")]
    PostNotFound,

    #[error("Post with id={0} not found, maybe already deleted?")]
    DeleteTargetNotFound(i64),

    #[error("{message}")]
    InvalidBody { status: StatusCode, message: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_)
            | ApiError::MissingParameter(_)
            | ApiError::MissingIdentifier
            | ApiError::MissingDeleteId => StatusCode::BAD_REQUEST,
            ApiError::PostNotFound | ApiError::DeleteTargetNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidBody { status, .. } => *status,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        match self {
            ApiError::Validation(errors) => (status, Json(errors)).into_response(),
            // Not-found and delete messages go out as a bare JSON string.
            ApiError::PostNotFound
            | ApiError::DeleteTargetNotFound(_)
            | ApiError::MissingDeleteId => (status, Json(message)).into_response(),
            ApiError::Store(e) => {
                tracing::error!(error = %e, "store operation failed");
                (
                    status,
                    Json(ErrorResponse {
                        code: status.as_u16(),
                        message: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
            ApiError::MissingParameter(_)
            | ApiError::MissingIdentifier
            | ApiError::InvalidBody { .. } => (
                status,
                Json(ErrorResponse {
                    code: status.as_u16(),
                    message,
                }),
            )
                .into_response(),
        }
    }
}
