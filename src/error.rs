use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// JSON error body of the `/api` routes.
#[derive(Debug)]
pub struct ApiError(pub reptrack_shared::Error);

impl From<reptrack_shared::Error> for ApiError {
    fn from(value: reptrack_shared::Error) -> Self {
        Self(value)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        use reptrack_shared::Error;

        match &self.0 {
            Error::Validate(_) | Error::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Upstream(_) => StatusCode::BAD_GATEWAY,
            Error::Server(_) | Error::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use reptrack_shared::Error;

        let status = self.status();
        let body = match &self.0 {
            Error::Validate(errors) => json!({
                "error": "validation_failed",
                "message": errors.to_string(),
                "fields": errors,
            }),
            Error::InvalidInput(message) => json!({
                "error": "invalid_input",
                "message": message,
            }),
            Error::Storage(err) => {
                tracing::error!(err = %err, "storage unavailable");
                json!({
                    "error": "storage_unavailable",
                    "message": crate::template::UNAVAILABLE_MESSAGE,
                })
            }
            Error::Upstream(message) => {
                tracing::error!(err = %message, "upstream failure");
                json!({
                    "error": "upstream_failed",
                    "message": message,
                })
            }
            Error::Server(_) | Error::Unknown(_) => {
                tracing::error!(err = %self.0, "internal error");
                json!({
                    "error": "internal_error",
                    "message": crate::template::SERVER_ERROR_MESSAGE,
                })
            }
        };

        (status, Json(body)).into_response()
    }
}
