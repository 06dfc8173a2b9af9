use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::RegistryError;
use thiserror::Error;
use tracing::error;

/// Errors surfaced at the HTTP boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request payload: {0}")]
    MalformedRequest(String),
    #[error("missing {0} parameter")]
    MissingParameter(&'static str),
    #[error("instance not found: {0}")]
    NotFound(String),
    #[error("backend operation failed")]
    BackendUnavailable(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedRequest(_) | ApiError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BackendUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RegistryError> for ApiError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::NotFound(id) => ApiError::NotFound(id),
            RegistryError::BackendUnavailable(msg) => ApiError::BackendUnavailable(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::BackendUnavailable(detail) = &self {
            error!(error = %detail, "backend operation failed");
        }
        (status, Json(serde_json::json!({"error": self.to_string()}))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unreachable: {0}")]
    Database(String),
    #[error("schema setup failed: {0}")]
    Migration(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_errors_map_to_status_codes() {
        let nf: ApiError = RegistryError::NotFound("i-1".into()).into();
        assert_eq!(nf.status(), StatusCode::NOT_FOUND);
        let down: ApiError = RegistryError::BackendUnavailable("refused".into()).into();
        assert_eq!(down.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::MissingParameter("id").status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn backend_detail_is_not_exposed() {
        let e = ApiError::BackendUnavailable("password authentication failed".into());
        assert_eq!(e.to_string(), "backend operation failed");
    }
}
