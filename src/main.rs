use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use rest_s3_proxy::api;
use rest_s3_proxy::config::Config;
use rest_s3_proxy::storage::s3::S3Store;
use rest_s3_proxy::utils::cli::Args;
use rest_s3_proxy::utils::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = validate_config(&args);

    let store = Arc::new(S3Store::new(&config).await);
    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState::new(config, store));

    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    tracing::info!("startup complete");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutting down...");
}

/// Check the environment-derived settings all at once; any missing required
/// value is fatal before the listener starts. Credential values are only
/// checked for presence, never printed.
fn validate_config(args: &Args) -> Config {
    let mut validation_errors = Vec::new();

    let bucket = match &args.bucket {
        Some(bucket) => bucket.clone(),
        None => {
            validation_errors
                .push("Unable to start as required env AWS_BUCKET is not defined".to_string());
            String::new()
        }
    };

    for credential in ["AWS_ACCESS_KEY_ID", "AWS_SECRET_ACCESS_KEY"] {
        if std::env::var(credential).map(|v| v.is_empty()).unwrap_or(true) {
            validation_errors.push(format!(
                "Unable to start as required env {credential} is not defined"
            ));
        }
    }

    if args.health_cache_interval < 0 {
        validation_errors.push(format!(
            "HEALTH_CACHE_INTERVAL must not be negative, got {}",
            args.health_cache_interval
        ));
    }

    if !validation_errors.is_empty() {
        eprintln!("{}", validation_errors.join("\n"));
        std::process::exit(1);
    }

    tracing::info!("AWS_REGION: {}", args.region);
    tracing::info!("AWS_BUCKET: {bucket}");
    tracing::info!("HEALTH_FILE: {}", args.health_file);
    tracing::info!("HEALTH_CACHE_INTERVAL: {}", args.health_cache_interval);

    Config {
        host: args.host.clone(),
        port: args.port,
        region: args.region.clone(),
        bucket,
        endpoint_url: args.endpoint_url.clone(),
        health_file: args.health_file.clone(),
        health_cache_interval: args.health_cache_interval,
    }
}
