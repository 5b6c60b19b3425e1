use crate::rates::Country;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history store lock poisoned")]
    Poisoned,
}

/// Every way a request can fail. Client errors carry the message returned to
/// the caller; `Internal` keeps its cause for the server log only.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required fields: countryFrom, countryTo, score")]
    MissingFields,

    #[error("Malformed JSON body")]
    MalformedBody,

    #[error("Invalid countryFrom. Must be one of: {}", Country::valid_codes())]
    InvalidCountryFrom,

    #[error("Invalid countryTo. Must be one of: {}", Country::valid_codes())]
    InvalidCountryTo,

    #[error("Score must be between 0 and 1000")]
    ScoreOutOfRange,

    #[error("Endpoint not found")]
    NotFound,

    #[error("Internal server error")]
    Internal(#[from] HistoryError),

    #[error("Internal server error")]
    Panic(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFields
            | ApiError::MalformedBody
            | ApiError::InvalidCountryFrom
            | ApiError::InvalidCountryTo
            | ApiError::ScoreOutOfRange => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) | ApiError::Panic(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(cause) => tracing::error!(error = %cause, "request failed"),
            ApiError::Panic(detail) => tracing::error!(panic = %detail, "handler panicked"),
            ApiError::NotFound => {}
            rejected => tracing::debug!(reason = %rejected, "request rejected"),
        }

        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::MissingFields.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::ScoreOutOfRange.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(HistoryError::Poisoned).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_message_hides_cause() {
        let err = ApiError::from(HistoryError::Poisoned);
        assert_eq!(err.to_string(), "Internal server error");

        let err = ApiError::Panic("index out of bounds".to_string());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn test_invalid_country_lists_codes() {
        assert_eq!(
            ApiError::InvalidCountryFrom.to_string(),
            "Invalid countryFrom. Must be one of: US, UK, India, Canada"
        );
        assert_eq!(
            ApiError::InvalidCountryTo.to_string(),
            "Invalid countryTo. Must be one of: US, UK, India, Canada"
        );
    }
}
