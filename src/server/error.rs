//! Mapping of crate errors onto HTTP responses.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::types::ErrorResponse;
use crate::Error;

/// Everything a handler can fail with.
#[derive(Debug)]
pub enum ApiError {
    Graph(Error),
    /// Malformed query string or body, rejected before reaching the graph.
    Rejected { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Graph(e) => match e {
                Error::InvalidArgument(_) => StatusCode::BAD_REQUEST,
                Error::UnknownCompound(_) | Error::NotFound(_) => StatusCode::NOT_FOUND,
                Error::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                Error::Cancelled | Error::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
                Error::Internal(_) | Error::Serialization(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Rejected { status, .. } => *status,
        }
    }
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError::Graph(e)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Rejected { status: StatusCode::BAD_REQUEST, message: rejection.body_text() }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected { status: rejection.status(), message: rejection.body_text() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            ApiError::Graph(e) if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(error = %e, "internal server error");
                "internal error".to_string()
            }
            ApiError::Graph(e) => e.to_string(),
            ApiError::Rejected { message, .. } => message,
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (Error::InvalidArgument("x".into()), StatusCode::BAD_REQUEST),
            (Error::UnknownCompound("X".into()), StatusCode::NOT_FOUND),
            (Error::NotFound("X".into()), StatusCode::NOT_FOUND),
            (Error::StoreUnavailable("down".into()), StatusCode::SERVICE_UNAVAILABLE),
            (Error::Cancelled, StatusCode::REQUEST_TIMEOUT),
            (Error::Timeout { elapsed_ms: 10 }, StatusCode::REQUEST_TIMEOUT),
            (Error::Io(std::io::Error::other("disk")), StatusCode::INTERNAL_SERVER_ERROR),
            (Error::Internal("join".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[tokio::test]
    async fn test_internal_error_does_not_leak_details() {
        let response = ApiError::from(Error::Io(std::io::Error::other("secret path /etc/x"))).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.error, "internal error");
    }
}
