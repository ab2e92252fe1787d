use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::http::Method;
use axum::response::{IntoResponse, Response};

use crate::error::AppError;
use crate::service::health::health_handler;
use crate::service::object::{delete_object_handler, get_object_handler, put_object_handler};
use crate::utils::state::AppState;

/// A request with no object key cannot be served.
pub async fn reject_empty_key() -> AppError {
    AppError::BadRequest
}

/// Single entry point: the captured tail (leading slash already stripped)
/// is the object key, except for the reserved `healthz` literal.
pub async fn dispatch_handler(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    request: Request,
) -> Result<Response, AppError> {
    let method = request.method().clone();

    if key.is_empty() {
        return Err(AppError::BadRequest);
    }

    if key == "healthz" {
        return if method == Method::GET {
            health_handler(State(state))
                .await
                .map(|res| res.into_response())
        } else {
            Err(AppError::health_method_not_allowed())
        };
    }

    tracing::info!("handling {method} request for '{key}'");

    match method {
        Method::GET => get_object_handler(State(state), Path(key))
            .await
            .map(|res| res.into_response()),
        Method::PUT => put_object_handler(State(state), Path(key), request)
            .await
            .map(|res| res.into_response()),
        Method::DELETE => delete_object_handler(State(state), Path(key))
            .await
            .map(|res| res.into_response()),
        method => Err(AppError::method_not_supported(&method)),
    }
}
