use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{http::StatusCode, HttpRequest, HttpResponse, ResponseError};
use thiserror::Error;
use crate::core::MatchError;
use crate::models::ErrorResponse;
use crate::services::StoreError;

/// Errors surfaced by HTTP handlers
///
/// Rendered as the JSON `ErrorResponse` body with a matching status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}

impl ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_failed",
            ApiError::Match(MatchError::ProfileNotFound(_)) => "profile_not_found",
            ApiError::Match(MatchError::InactiveProfile(_)) => "inactive_profile",
            ApiError::Match(MatchError::SelfMatch) => "self_match",
            ApiError::Match(MatchError::AlreadyMatched(_, _)) => "already_matched",
            ApiError::Match(MatchError::NotRecipient(_)) => "not_recipient",
            ApiError::Match(MatchError::NotParticipant(_)) => "not_participant",
            ApiError::Match(MatchError::InvalidTransition { .. }) => "invalid_transition",
            ApiError::Store(StoreError::NotFound(_)) => "not_found",
            ApiError::Store(StoreError::Conflict(_)) => "conflict",
            ApiError::Store(_) => "storage_error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Match(MatchError::SelfMatch) => StatusCode::BAD_REQUEST,
            ApiError::Match(MatchError::ProfileNotFound(_)) | ApiError::Store(StoreError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Match(MatchError::NotRecipient(_)) | ApiError::Match(MatchError::NotParticipant(_)) => {
                StatusCode::FORBIDDEN
            }
            ApiError::Match(MatchError::InactiveProfile(_))
            | ApiError::Match(MatchError::AlreadyMatched(_, _))
            | ApiError::Match(MatchError::InvalidTransition { .. })
            | ApiError::Store(StoreError::Conflict(_)) => StatusCode::CONFLICT,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::info!("Request rejected ({}): {}", status.as_u16(), self);
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.error_code().to_string(),
            message: self.to_string(),
            status_code: status.as_u16(),
        })
    }
}

/// Handle JSON payload errors
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::Validation(format!("Invalid JSON: {}", err)).into()
}

/// Handle query payload errors
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::Validation(format!("Invalid query: {}", err)).into()
}

/// Handle malformed path segments such as a non-UUID match id
pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::Validation(format!("Invalid path: {}", err)).into()
}
