use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::storage::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    /// The request carried no object key (bare `/`).
    #[error("Path must be provided")]
    BadRequest,

    /// Unsupported verb for the matched route; carries the full body text.
    #[error("{0}")]
    MethodNotAllowed(String),

    /// A store operation on `path` failed.
    #[error("store operation on '{path}' failed: {source}")]
    Store {
        path: String,
        #[source]
        source: StoreError,
    },

    /// Local failure reading the inbound request body.
    #[error("IO error: {0}")]
    Io(#[from] axum::Error),
}

impl AppError {
    pub fn store(path: impl Into<String>, source: StoreError) -> Self {
        AppError::Store {
            path: path.into(),
            source,
        }
    }

    pub fn method_not_supported(method: &Method) -> Self {
        AppError::MethodNotAllowed(format!("Method {method} not supported"))
    }

    pub fn health_method_not_allowed() -> Self {
        AppError::MethodNotAllowed("/healthz is restricted to GET requests".to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("generating error response: {self:?}");

        let (status_code, body) = match self {
            AppError::BadRequest => {
                (StatusCode::BAD_REQUEST, "Path must be provided".to_string())
            }
            AppError::MethodNotAllowed(msg) => (StatusCode::METHOD_NOT_ALLOWED, msg),
            AppError::Store {
                path,
                source: StoreError::NotFound { message },
            } => (
                StatusCode::NOT_FOUND,
                format!("Path '{path}' not found: {message}"),
            ),
            AppError::Store {
                source:
                    StoreError::Provider {
                        code,
                        message,
                        cause,
                    },
                ..
            } => {
                let cause = cause.map(|c| format!(" (Cause: {c})")).unwrap_or_default();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("An internal error occurred: {code} = {message}{cause}"),
                )
            }
            AppError::Io(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("An internal error occurred: {err}"),
            ),
        };

        (status_code, body).into_response()
    }
}
