//! Water Salt Level Predictor
//!
//! Single-page service that predicts salt concentration (mg/L) from water
//! quality measurements and tells whether the water is drinkable.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SALT PREDICTOR                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌───────────────┐  ┌─────────────────────┐  │
//! │  │  Form     │  │  JSON API     │  │  Health / Metadata  │  │
//! │  │  (HTML)   │  │  /api/v1/...  │  │                     │  │
//! │  └─────┬─────┘  └───────┬───────┘  └──────────┬──────────┘  │
//! │        └────────────────┼─────────────────────┘             │
//! │                         ▼                                   │
//! │        ┌─────────────────────────────────┐                  │
//! │        │ Predictor: scaler -> model      │ (loaded once)    │
//! │        └─────────────────────────────────┘                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod models;
pub mod views;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use error::{AppError, AppResult};

use logic::model::{ArtifactInfo, Predictor};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
    pub artifacts: Arc<ArtifactInfo>,
    pub config: config::Config,
}

impl AppState {
    pub fn new(predictor: Predictor, artifacts: ArtifactInfo, config: config::Config) -> Self {
        Self {
            predictor: Arc::new(predictor),
            artifacts: Arc::new(artifacts),
            config,
        }
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    // Page routes
    let page_routes = Router::new()
        .route("/", get(handlers::form::index))
        .route("/predict", get(handlers::form::index).post(handlers::form::submit));

    // API routes
    let api_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/features", get(handlers::features::list))
        .route("/api/v1/predict", post(handlers::predict::predict));

    Router::new()
        .merge(page_routes)
        .merge(api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}
