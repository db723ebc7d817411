//! Main entry point for the contact relay server binary

use anyhow::Result;
use nest_core::{build_transport, create_app_with_config, run_server, AppConfig, AppState};
use std::{net::SocketAddr, time::Duration};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv_path = dotenvy::dotenv().ok();

    init_tracing();

    if let Some(path) = dotenv_path {
        info!("Loaded environment from {}", path.display());
    }

    let config = AppConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    info!("Configuration loaded successfully");
    info!("Server will bind to: {}", config.bind_address());
    info!("Allowed origins: {}", config.cors.allowed_origins.join(", "));
    info!("Admin notifications go to: {}", config.mail.admin_address);

    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    let transport = build_transport(&config.mail)
        .map_err(|e| anyhow::anyhow!("Failed to initialize mail transport: {}", e))?;

    let state = AppState::new(transport, &config);
    info!("App: {} v{}", state.app_name, state.version);

    let app = create_app_with_config(state, &config);

    run_server(
        app,
        addr,
        Duration::from_secs(config.server.shutdown_timeout_seconds),
    )
    .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let default_level = if cfg!(debug_assertions) {
            "debug"
        } else {
            "info"
        };

        format!(
            "{}={},nest_core={},tower_http=debug,axum=debug",
            env!("CARGO_CRATE_NAME").replace('-', "_"),
            default_level,
            default_level
        )
        .into()
    });

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let is_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .init();
    }
}
