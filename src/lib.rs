pub mod app_state;
pub mod config;
pub mod dedup;
pub mod handlers;
pub mod models;
pub mod services;
pub mod utils;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::config::CorsPolicy;

pub fn create_router(state: AppState, cors: &CorsPolicy) -> Router {
    Router::new()
        .route("/", get(handlers::health::health_check))
        .route("/health", get(handlers::health::health_check))
        .route("/api/collect", post(handlers::collect::collect_data))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors.layer()),
        )
        .with_state(state)
}
