use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::RouteError;
use crate::infrastructure::ParseError;
use crate::presentation::rest::dto::ErrorResponse;

/// API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }
}

impl From<ParseError> for ApiError {
    fn from(err: ParseError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl From<RouteError> for ApiError {
    fn from(err: RouteError) -> Self {
        match &err {
            RouteError::InvalidSignal(_)
            | RouteError::UnknownRoute(_)
            | RouteError::InvalidOrderFields(_) => ApiError::bad_request(err.to_string()),
            // The caller never sees which downstream stage failed.
            RouteError::Forward(_) => ApiError::internal("Forwarding error"),
            RouteError::Internal(_) => ApiError::internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(self.detail));
        (self.status, body).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "API Error {}: {}", self.status, self.detail)
    }
}

impl std::error::Error for ApiError {}
