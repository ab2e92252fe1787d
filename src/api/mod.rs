pub mod gateway;

use std::sync::Arc;

use axum::Router;
use axum::routing::any;
use tower_http::trace::TraceLayer;

use crate::api::gateway::{dispatch_handler, reject_empty_key};
use crate::utils::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", any(reject_empty_key))
        .route("/{*key}", any(dispatch_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
