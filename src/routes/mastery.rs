use axum::extract::{Path, State};
use axum::routing::put;
use axum::{Json, Router};
use serde::Serialize;

use crate::extract::ApiJson;
use crate::planning::MasteryMap;
use crate::response::AppError;
use crate::services::mastery_store::MasteryStoreError;
use crate::state::AppState;
use crate::validation;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/mastery/:student_id",
        put(store_mastery).get(get_mastery).delete(delete_mastery),
    )
}

#[derive(Serialize)]
struct MasterySnapshotResponse {
    student_id: String,
    mastery: MasteryMap,
}

#[derive(Serialize)]
struct MasteryDeleteResponse {
    student_id: String,
    removed: bool,
}

fn store_error(err: MasteryStoreError) -> AppError {
    tracing::warn!(error = %err, "mastery store write failed");
    AppError::service_unavailable("掌握度存储暂不可用")
}

async fn store_mastery(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    ApiJson(mastery): ApiJson<MasteryMap>,
) -> Result<Json<MasterySnapshotResponse>, AppError> {
    validation::not_blank("student_id", &student_id)?;
    for score in mastery.values() {
        validation::unit_interval("mastery", *score)?;
    }

    state
        .mastery_store()
        .store(&student_id, mastery.clone())
        .await
        .map_err(store_error)?;

    Ok(Json(MasterySnapshotResponse {
        student_id,
        mastery,
    }))
}

async fn get_mastery(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Json<MasterySnapshotResponse> {
    let mastery = state.mastery_store().lookup(&student_id).await;
    Json(MasterySnapshotResponse {
        student_id,
        mastery,
    })
}

async fn delete_mastery(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<MasteryDeleteResponse>, AppError> {
    let removed = state
        .mastery_store()
        .remove(&student_id)
        .await
        .map_err(store_error)?;

    Ok(Json(MasteryDeleteResponse {
        student_id,
        removed,
    }))
}
