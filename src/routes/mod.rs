mod affective;
mod analytics;
mod assessment;
mod health;
mod mastery;
mod path;

use axum::response::{IntoResponse, Response};
use axum::Router;

use crate::response::AppError;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(path::router())
        .merge(mastery::router())
        .merge(assessment::router())
        .merge(analytics::router())
        .merge(affective::router())
        .nest("/health", health::router())
        .fallback(fallback_handler)
        .with_state(state)
}

async fn fallback_handler() -> Response {
    AppError::not_found("接口不存在").into_response()
}
