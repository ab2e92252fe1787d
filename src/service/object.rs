use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, Request, State};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use axum::http::{Response, StatusCode};
use axum::response::IntoResponse;

use crate::error::AppError;
use crate::utils::state::AppState;

/// GET /<key>
pub async fn get_object_handler(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let data = state
        .store
        .get(&key)
        .await
        .map_err(|err| AppError::store(&key, err))?;

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "application/octet-stream")
        .header(CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .unwrap())
}

/// PUT /<key>
///
/// Always answers 201 Created, even when an existing object was
/// overwritten; the store does not report which happened.
pub async fn put_object_handler(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    request: Request,
) -> Result<impl IntoResponse, AppError> {
    let data = axum::body::to_bytes(request.into_body(), usize::MAX).await?;

    state
        .store
        .put(&key, data)
        .await
        .map_err(|err| AppError::store(&key, err))?;

    Ok(Response::builder()
        .status(StatusCode::CREATED)
        .header(LOCATION, format!("/{key}"))
        .body(Body::empty())
        .unwrap())
}

/// DELETE /<key>
pub async fn delete_object_handler(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state
        .store
        .delete(&key)
        .await
        .map_err(|err| AppError::store(&key, err))?;

    Ok(Response::builder()
        .status(StatusCode::NO_CONTENT)
        .body(Body::empty())
        .unwrap())
}
