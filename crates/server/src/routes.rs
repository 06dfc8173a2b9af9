use axum::{http::StatusCode, routing::{get, post}, Json, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::AppState;

pub mod instances;

pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

async fn metrics() -> (StatusCode, String) {
    match service::metrics::encode_metrics() {
        Ok(text) => (StatusCode::OK, text),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}")),
    }
}

/// Build the full application router.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let instance_routes = Router::new()
        .route("/phone-home", post(instances::phone_home))
        .route("/instance-status", get(instances::instance_status))
        .route("/list-ids", get(instances::list_ids));

    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .merge(instance_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
