//! Core library for the Nomadic Nest contact relay: configuration, form
//! validation, email composition and delivery, and the HTTP surface.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod mail;
pub mod middleware;
pub mod models;
pub mod services;
pub mod validation;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use handlers::create_routes;
pub use mail::{build_transport, LogTransport, MailTransport, MemoryTransport, SmtpMailer};
pub use middleware::cors::cors_layer_from_config;
pub use models::{ContactResponse, Submission, SubmissionPayload};
pub use services::{ContactService, RelayError};
pub use validation::{ContactForm, Field};

use axum::{middleware as axum_middleware, Router};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub contact_service: ContactService,
}

impl AppState {
    pub fn new(transport: Arc<dyn MailTransport>, config: &AppConfig) -> Self {
        Self {
            app_name: "Nomadic Nest Contact Relay".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            contact_service: ContactService::new(transport, config.mail.clone()),
        }
    }

    /// State with default settings around the given transport.
    pub fn with_transport<T: MailTransport + 'static>(transport: T) -> Self {
        Self::new(Arc::new(transport), &AppConfig::default())
    }
}

pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, &AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Router {
    let allowed_origins = middleware::origin::AllowedOrigins::from_config(&config.cors);

    Router::new()
        .merge(create_routes(config.server.liveness_route))
        .layer(cors_layer_from_config(&config.cors))
        .layer(axum_middleware::from_fn_with_state(
            allowed_origins,
            middleware::origin::origin_guard,
        ))
        .layer(middleware::logging::logging_layer())
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr, shutdown_timeout: Duration) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Other(anyhow::anyhow!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tokio::spawn(async move {
            tokio::time::sleep(shutdown_timeout).await;
            warn!("Graceful shutdown timed out after {:?}, exiting", shutdown_timeout);
            std::process::exit(1);
        });
    });

    server
        .await
        .map_err(|e| AppError::Other(anyhow::anyhow!("Server error: {}", e)))?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
