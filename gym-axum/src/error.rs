//! The error type shared by every handler.
//!
//! Each variant maps to a fixed status code and renders as
//! `{"error": <message>}`, with per-field messages added for validation
//! failures.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gym_core::models::FieldErrors;
use schemars::JsonSchema;
use serde::Serialize;
use tracing::{Level, event};

/// Why a request could not be served.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A required identifier was not supplied
    #[error("{0}")]
    MissingParameter(&'static str),
    /// A referenced entity does not exist, or does not belong where claimed
    #[error("{0}")]
    NotFound(&'static str),
    /// The submitted fields failed validation
    #[error("Invalid submission")]
    Invalid(#[from] FieldErrors),
    /// Anything else: malformed identifiers, unreadable bodies, storage failures
    #[error("{0}")]
    Unexpected(String),
}

impl ApiError {
    /// Log a backend failure and surface its message.
    pub(crate) fn storage(err: impl std::error::Error) -> Self {
        event!(Level::ERROR, err = err.to_string());
        Self::Unexpected(err.to_string())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MissingParameter(_) | Self::Invalid(_) | Self::Unexpected(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

/// The body of every error response.
#[derive(Serialize, JsonSchema)]
pub struct ErrorBody {
    /// A human readable description of the failure
    pub error: String,
    /// Messages for each field that failed validation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.to_string();
        let fields = match self {
            Self::Invalid(fields) => Some(fields),
            _ => None,
        };
        (status, Json(ErrorBody { error, fields })).into_response()
    }
}

impl aide::operation::OperationOutput for ApiError {
    type Inner = ErrorBody;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        <Json<ErrorBody> as aide::operation::OperationOutput>::operation_response(ctx, operation)
    }
}
