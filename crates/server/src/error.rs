use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::DbErr;
use services::services::{
    generation::GenerationError, history::HistoryError, provider::ProviderError,
};
use thiserror::Error;
use utils::response::ApiResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    History(#[from] HistoryError),
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal server error: {0}")]
    Internal(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, error_type) = match &self {
            ApiError::Generation(err) => match err {
                GenerationError::MissingPrompt => (StatusCode::BAD_REQUEST, "ValidationError"),
                GenerationError::Provider(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "GenerationError")
                }
            },
            ApiError::History(err) => match err {
                HistoryError::MissingFields | HistoryError::InvalidDimensions => {
                    (StatusCode::BAD_REQUEST, "ValidationError")
                }
                HistoryError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "HistoryError"),
            },
            ApiError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DatabaseError"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NotFound"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "InternalError"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BadRequest"),
        };

        // Caller-facing text: validation messages pass through, provider and
        // store failures collapse to generic messages with detail kept in
        // the logs.
        let error_message = match &self {
            ApiError::Generation(err) => match err {
                GenerationError::MissingPrompt => err.to_string(),
                GenerationError::Provider(ProviderError::EmptyResponse) => {
                    "No image generated".to_string()
                }
                GenerationError::Provider(_) => "Failed to generate image".to_string(),
            },
            ApiError::History(err) => match err {
                HistoryError::Database(_) => "Failed to save image".to_string(),
                _ => err.to_string(),
            },
            ApiError::Database(_) => "Internal server error".to_string(),
            ApiError::NotFound(msg) => msg.clone(),
            ApiError::Internal(msg) => msg.clone(),
            ApiError::BadRequest(msg) => msg.clone(),
        };

        if status_code.is_server_error() {
            tracing::error!(
                status = %status_code,
                error_type,
                error = %self,
                "API request failed"
            );
        }
        let response = ApiResponse::<()>::error(&error_message);
        (status_code, Json(response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_maps_to_expected_http_statuses() {
        assert_eq!(
            ApiError::BadRequest("bad".to_string())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("missing".to_string())
                .into_response()
                .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal("boom".to_string())
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn domain_errors_map_to_expected_http_statuses() {
        assert_eq!(
            ApiError::from(GenerationError::MissingPrompt)
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(GenerationError::Provider(ProviderError::EmptyResponse))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(HistoryError::MissingFields)
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(HistoryError::Database(DbErr::Custom("down".to_string())))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
