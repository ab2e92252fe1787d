/// Immutable runtime configuration, constructed once during startup
/// validation and shared through `AppState`.
#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub region: String,
    pub bucket: String,
    pub endpoint_url: Option<String>,
    pub health_file: String,
    pub health_cache_interval: i64,
}
