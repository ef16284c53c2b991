use crate::config::Config;
use crate::conversion::Converter;
use crate::error::Error;
use crate::images::ImageStore;
use anyhow::Result;
use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

pub mod routes_files;
pub mod routes_upload;

/// Shared application context
///
/// Built once before the listener starts and never mutated afterwards.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    /// Where uploads are written and `/files` is served from
    pub store: Arc<ImageStore>,
    /// Bitmap decoder + photo encoder used by `/upload`
    pub converter: Converter,
}

impl AppContext {
    /// Context with the default netpbm -> JPEG converter
    pub fn new(config: Config) -> Self {
        Self::with_converter(config, Converter::default())
    }

    pub fn with_converter(config: Config, converter: Converter) -> Self {
        let store = ImageStore::new(config.storage.dir.clone());
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            converter,
        }
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(routes_upload::upload_routes())
        .merge(routes_files::file_routes(ctx.store.root()))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Prepare storage, bind the listener and serve until a shutdown signal
pub async fn start_server(config: Config) -> Result<()> {
    let ctx = AppContext::new(config);

    ctx.store.ensure_root().await?;

    let host = ctx.config.server.host.clone();
    let port = ctx.config.server.port;
    let listener = TcpListener::bind((host.as_str(), port))
        .await
        .map_err(|e| Error::startup(format!("Failed to bind {}:{}", host, port), e))?;

    tracing::info!("Storing images in {}", ctx.store.root().display());
    tracing::info!("Handing out URLs under {}", ctx.config.server.base_url);

    serve(listener, ctx).await
}

/// Run the HTTP server on an already-bound listener
pub async fn serve(listener: TcpListener, ctx: AppContext) -> Result<()> {
    let app = create_router(ctx);

    tracing::info!("Starting server on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
