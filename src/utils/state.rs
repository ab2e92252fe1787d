use std::sync::Arc;

use crate::config::Config;
use crate::service::health::HealthState;
use crate::storage::ObjectStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ObjectStore>,
    pub health: Arc<HealthState>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn ObjectStore>) -> Self {
        let health = Arc::new(HealthState::new(config.health_cache_interval));
        AppState {
            store,
            health,
            config: Arc::new(config),
        }
    }
}
