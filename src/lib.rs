pub mod cache;
pub mod config;
pub mod extract;
pub mod logging;
pub mod planning;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
pub mod validation;

use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

pub fn build_app(state: AppState) -> axum::Router {
    routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
