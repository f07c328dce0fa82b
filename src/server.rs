//! HTTP server bootstrap for the loyalty intake service.
//!
//! This module wires together:
//! - configuration
//! - the submission pipeline and its collaborators
//! - the Axum router

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::AllowOrigin;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use crate::infra::{
    FsBackupStore, SendGridMailer, SubmissionPipeline, SystemClock, UploadStore, MAX_LOGO_BYTES,
};

/// Reviewers notified of every submission.
const NOTIFICATION_RECIPIENTS: &[&str] = &[
    "peshal@dosink.com",
    "smriti@dosink.com",
    "shilash@dosink.com",
];

/// Sender used when `SENDGRID_MAIL` is not set.
const DEFAULT_SENDER: &str = "ppeshalmani@gmail.com";

/// Whole-request ceiling; the per-file limit is enforced in the handler so
/// an oversized logo gets its specific rejection message.
const MAX_BODY_BYTES: usize = (MAX_LOGO_BYTES as usize) + 1024 * 1024;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server listen address.
    pub listen_addr: SocketAddr,
    /// SendGrid API credential.
    pub sendgrid_api_key: String,
    /// Notification sender address.
    pub sender: String,
    /// Directory for submission backup documents.
    pub backup_dir: String,
    /// Directory for temporary logo uploads.
    pub upload_dir: String,
}

impl Config {
    /// Load configuration from environment variables. The dispatch
    /// credential is required; startup fails fast without it.
    pub fn from_env() -> anyhow::Result<Self> {
        let sendgrid_api_key = match std::env::var("SENDGRID_API") {
            Ok(key) if !key.trim().is_empty() => key,
            _ => anyhow::bail!("SENDGRID_API environment variable is required"),
        };

        let sender =
            std::env::var("SENDGRID_MAIL").unwrap_or_else(|_| DEFAULT_SENDER.to_string());

        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let listen_addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid listen address: {e}"))?;

        let backup_dir =
            std::env::var("BACKUP_DIR").unwrap_or_else(|_| "submissions".to_string());
        let upload_dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());

        Ok(Self {
            listen_addr,
            sendgrid_api_key,
            sender,
            backup_dir,
            upload_dir,
        })
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<SubmissionPipeline>,
    pub uploads: Arc<UploadStore>,
}

impl AppState {
    /// Assemble the production collaborators from configuration.
    pub fn from_config(config: &Config) -> Self {
        let uploads = Arc::new(UploadStore::new(&config.upload_dir));
        let pipeline = Arc::new(SubmissionPipeline::new(
            Arc::new(SystemClock),
            Arc::new(FsBackupStore::new(&config.backup_dir)),
            Arc::new(SendGridMailer::new(config.sendgrid_api_key.clone())),
            uploads.clone(),
            NOTIFICATION_RECIPIENTS
                .iter()
                .map(|r| r.to_string())
                .collect(),
            config.sender.clone(),
        ));

        Self { pipeline, uploads }
    }
}

/// Start the HTTP server.
pub async fn run() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting loyalty intake service v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    info!("Configuration loaded");
    info!("  Listen address: {}", config.listen_addr);
    info!("  Backup directory: {}", config.backup_dir);
    info!("  Upload directory: {}", config.upload_dir);
    info!("  Sender address: {}", config.sender);

    let state = AppState::from_config(&config);
    let app = build_router(state)?;

    info!("Starting HTTP server on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;

    info!("Loyalty intake service is ready to accept submissions");
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();
}

/// Build the application router around the given state.
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let mut router = Router::new()
        .merge(crate::api::router())
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http());

    if let Some(cors_layer) = cors_layer_from_env()? {
        router = router.layer(cors_layer);
    }

    Ok(router.with_state(state))
}

fn cors_layer_from_env() -> anyhow::Result<Option<CorsLayer>> {
    let origins = match std::env::var("CORS_ALLOW_ORIGINS") {
        Ok(v) => v,
        Err(_) => return Ok(None),
    };

    let origins = origins.trim();
    if origins.is_empty() {
        return Ok(None);
    }

    let allow_origin = if origins == "*" {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = origins
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<HeaderValue>()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin {s:?}: {e}"))
            })
            .collect::<anyhow::Result<_>>()?;
        AllowOrigin::list(origins)
    };

    Ok(Some(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([axum::http::header::CONTENT_TYPE]),
    ))
}

/// Health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "healthy",
        "service": "loyalty-intake",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
