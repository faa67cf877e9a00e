use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tonic::{Code, Status};

/// Errors a gateway route can answer with.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("missing required query parameter `choice`")]
    MissingChoice,

    #[error("unknown choice {0}")]
    UnknownChoice(String),

    /// A backend call failed; the gRPC code decides the HTTP status.
    #[error("backend call failed: {} ({})", .0.message(), .0.code())]
    Backend(#[from] Status),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingChoice => StatusCode::BAD_REQUEST,
            Self::UnknownChoice(_) => StatusCode::NOT_FOUND,
            Self::Backend(status) => match status.code() {
                Code::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
                Code::InvalidArgument => StatusCode::BAD_REQUEST,
                _ => StatusCode::BAD_GATEWAY,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.status_code();
        if code.is_server_error() {
            tracing::warn!("{self}");
        } else {
            tracing::debug!("{self}");
        }
        (code, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_codes_map_to_http() {
        let cases = [
            (Status::unavailable("down"), StatusCode::SERVICE_UNAVAILABLE),
            (Status::invalid_argument("bad"), StatusCode::BAD_REQUEST),
            (Status::internal("boom"), StatusCode::BAD_GATEWAY),
            (Status::deadline_exceeded("slow"), StatusCode::BAD_GATEWAY),
        ];
        for (status, want) in cases {
            assert_eq!(ApiError::from(status).status_code(), want);
        }
    }

    #[test]
    fn request_errors_map_to_client_codes() {
        assert_eq!(ApiError::MissingChoice.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::UnknownChoice(":nope:".into()).status_code(),
            StatusCode::NOT_FOUND
        );
    }
}
