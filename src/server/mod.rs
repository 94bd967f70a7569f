pub mod routes;

use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the JSON API. One POST route per calculator.
pub fn router(state: Arc<AppState>) -> Router {
    let cors_permissive = state.config.cors_permissive;

    let app = Router::new()
        .route("/api/health", get(routes::get_health))
        .route("/api/counters", get(routes::get_counters))
        .route("/api/betting/ev", post(routes::post_ev))
        .route("/api/betting/kelly", post(routes::post_kelly))
        .route("/api/betting/parlay", post(routes::post_parlay))
        .route("/api/betting/convert", post(routes::post_convert))
        .route("/api/crypto/halving", post(routes::post_halving))
        .route("/api/crypto/profit", post(routes::post_profit))
        .route("/api/crypto/staking", post(routes::post_staking))
        .route("/api/interest/simple", post(routes::post_simple_interest))
        .route("/api/interest/compound", post(routes::post_compound_interest))
        .route("/api/mortgage", post(routes::post_mortgage))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors_permissive {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        app
    }
}
