use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Listening host
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Listening port
    #[arg(short, long, env = "PORT", default_value_t = 8000)]
    pub port: u16,

    /// AWS region of the target bucket
    #[arg(long, env = "AWS_REGION", default_value = "eu-west-1")]
    pub region: String,

    /// Target S3 bucket (required)
    #[arg(long, env = "AWS_BUCKET")]
    pub bucket: Option<String>,

    /// Endpoint override for S3-compatible backends
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Object key probed by the health check
    #[arg(long, env = "HEALTH_FILE", default_value = ".rest-s3-proxy")]
    pub health_file: String,

    /// Minimum seconds between two live health checks
    #[arg(long, env = "HEALTH_CACHE_INTERVAL", default_value_t = 120)]
    pub health_cache_interval: i64,
}
