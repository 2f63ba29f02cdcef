/// Leaf disease diagnosis service.
///
/// Accepts a leaf photo (upload or URL), forwards it to a disease classifier
/// (hosted detection API or local inference server), groups the detections
/// by class, and renders boxes plus treatment guidance.

mod advisory;
mod classifier;
mod config;
mod error;
mod handlers;
mod postprocess;
mod predict;
mod preprocess;
mod render;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use classifier::ClassifierHandle;
use config::Config;
use handlers::AppState;
use postprocess::geometry::Size;
use predict::Predictor;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), error::AppError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("leaf_diagnose=info,tower_http=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(num_cpus::get())
        .enable_all()
        .build()
        .map_err(|e| error::AppError::Internal(format!("Failed to build runtime: {e}")))?;

    info!(worker_threads = num_cpus::get(), "tokio runtime configured");

    runtime.block_on(async_main())
}

async fn async_main() -> Result<(), error::AppError> {
    let config = Config::from_env();
    info!("Starting leaf-diagnose service");
    info!("Classifier backend: {:?}", config.classifier.backend);
    info!("Minimum confidence: {}", config.min_confidence);
    info!("Port: {}", config.port);

    let classifier = ClassifierHandle::new(config.classifier.clone());
    // Not fatal: every submission reports the problem until it is fixed.
    if let Err(e) = classifier.check_config() {
        warn!("classifier not configured: {e}");
    }

    let state = Arc::new(AppState {
        predictor: Predictor::new(classifier, config.min_confidence, config.max_upload_bytes),
        overlay: Size::new(config.overlay_width, config.overlay_height),
    });

    let app = Router::new()
        .route("/", get(handlers::page::index))
        .route("/health", get(handlers::health::health))
        .route("/predict", post(handlers::predict::predict_page))
        .route("/api/predict", post(handlers::predict::predict_json))
        .route("/api/overlay", post(handlers::overlay::overlay))
        .with_state(state)
        // Oversize files must reach validation to get the friendly message.
        .layer(DefaultBodyLimit::max(
            config.max_upload_bytes + handlers::predict::BODY_LIMIT_HEADROOM,
        ))
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    info!("Server stopped");
    Ok(())
}
