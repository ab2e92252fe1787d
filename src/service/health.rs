use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use axum::extract::State;
use axum::response::IntoResponse;
use chrono::Utc;

use crate::error::AppError;
use crate::storage::ObjectStore;
use crate::utils::state::AppState;

/// Shared health-check window. Only the timestamp is mutable; it is an
/// atomic so concurrent probes cannot tear it. Two probes that both see an
/// expired window may both run a live check, which is harmless.
pub struct HealthState {
    last_check: AtomicI64,
    cache_interval: i64,
}

impl HealthState {
    /// Starts with a zeroed timestamp so the first probe always runs live.
    pub fn new(cache_interval: i64) -> Self {
        HealthState {
            last_check: AtomicI64::new(0),
            cache_interval,
        }
    }

    fn check_due(&self, now: i64) -> bool {
        now - self.last_check.load(Ordering::SeqCst) > self.cache_interval
    }

    fn record_pass(&self, now: i64) {
        self.last_check.store(now, Ordering::SeqCst);
    }
}

/// GET /healthz
pub async fn health_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    probe(
        state.store.as_ref(),
        &state.health,
        &state.config.health_file,
        Utc::now().timestamp(),
    )
    .await
}

/// Run the cached liveness probe. A live check is only issued once the
/// cache window has elapsed; a passing check moves the window forward, a
/// failing one leaves the timestamp alone so the next probe retries
/// immediately instead of caching the failure.
async fn probe(
    store: &dyn ObjectStore,
    health: &HealthState,
    health_file: &str,
    now: i64,
) -> Result<&'static str, AppError> {
    if health.check_due(now) {
        tracing::info!("making health check for path '{health_file}'");

        match store.get(health_file).await {
            Ok(_) => {
                tracing::info!("health check passed");
                health.record_pass(now);
            }
            Err(err) => {
                tracing::error!("health check failed");
                return Err(AppError::store(health_file, err));
            }
        }
    }
    Ok("OK")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoreError;
    use bytes::Bytes;
    use std::sync::atomic::AtomicUsize;

    /// Counts live checks; fails them all while `healthy` is false.
    struct CountingStore {
        gets: AtomicUsize,
        healthy: std::sync::atomic::AtomicBool,
    }

    impl CountingStore {
        fn new(healthy: bool) -> Self {
            CountingStore {
                gets: AtomicUsize::new(0),
                healthy: std::sync::atomic::AtomicBool::new(healthy),
            }
        }

        fn get_count(&self) -> usize {
            self.gets.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl ObjectStore for CountingStore {
        async fn get(&self, _key: &str) -> Result<Bytes, StoreError> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            if self.healthy.load(Ordering::SeqCst) {
                Ok(Bytes::new())
            } else {
                Err(StoreError::provider("ServiceUnavailable", "bucket unreachable"))
            }
        }

        async fn put(&self, _key: &str, _data: Bytes) -> Result<(), StoreError> {
            unimplemented!("health probe never writes")
        }

        async fn delete(&self, _key: &str) -> Result<(), StoreError> {
            unimplemented!("health probe never deletes")
        }
    }

    #[tokio::test]
    async fn probes_within_window_reuse_the_first_check() {
        let store = CountingStore::new(true);
        let health = HealthState::new(120);

        assert_eq!(probe(&store, &health, ".hc", 1_000).await.unwrap(), "OK");
        assert_eq!(store.get_count(), 1);

        // Second probe inside the window skips the live check.
        assert_eq!(probe(&store, &health, ".hc", 1_060).await.unwrap(), "OK");
        assert_eq!(store.get_count(), 1);
    }

    #[tokio::test]
    async fn probe_after_window_elapses_checks_again() {
        let store = CountingStore::new(true);
        let health = HealthState::new(120);

        // t=0 relative: first probe is always live because the timestamp
        // starts at zero.
        assert_eq!(probe(&store, &health, ".hc", 1_000).await.unwrap(), "OK");
        assert_eq!(probe(&store, &health, ".hc", 1_060).await.unwrap(), "OK");
        assert_eq!(store.get_count(), 1);

        // t=121: window elapsed, a second live check runs.
        assert_eq!(probe(&store, &health, ".hc", 1_121).await.unwrap(), "OK");
        assert_eq!(store.get_count(), 2);
    }

    #[tokio::test]
    async fn failed_check_is_never_cached() {
        let store = CountingStore::new(false);
        let health = HealthState::new(120);

        assert!(probe(&store, &health, ".hc", 1_000).await.is_err());
        assert_eq!(store.get_count(), 1);

        // Immediately after the failure the probe retries live rather than
        // waiting out the interval.
        assert!(probe(&store, &health, ".hc", 1_001).await.is_err());
        assert_eq!(store.get_count(), 2);

        // Recovery is picked up on the next probe, which then refreshes the
        // window.
        store.healthy.store(true, Ordering::SeqCst);
        assert_eq!(probe(&store, &health, ".hc", 1_002).await.unwrap(), "OK");
        assert_eq!(probe(&store, &health, ".hc", 1_050).await.unwrap(), "OK");
        assert_eq!(store.get_count(), 3);
    }

    #[tokio::test]
    async fn failure_surfaces_through_the_translator() {
        use axum::http::StatusCode;

        let store = CountingStore::new(false);
        let health = HealthState::new(120);

        let err = probe(&store, &health, ".hc", 1_000).await.unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
