use axum::routing::post;
use axum::{Json, Router};

use crate::extract::ApiJson;
use crate::response::AppError;
use crate::services::grading::{score_answer, GradeAnswerRequest, GradeAnswerResponse};
use crate::services::practice::{build_practice_plan, PracticePlanRequest, PracticePlanResponse};
use crate::services::reflection::{generate_reflections, ReflectionRequest, ReflectionResponse};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/grade-answer", post(grade_answer))
        .route("/practice-plan", post(practice_plan))
        .route("/reflection-questions", post(reflection_questions))
}

async fn grade_answer(
    ApiJson(payload): ApiJson<GradeAnswerRequest>,
) -> Json<GradeAnswerResponse> {
    Json(score_answer(&payload))
}

async fn practice_plan(
    ApiJson(payload): ApiJson<PracticePlanRequest>,
) -> Result<Json<PracticePlanResponse>, AppError> {
    payload.validate()?;
    Ok(Json(build_practice_plan(&payload)))
}

async fn reflection_questions(
    ApiJson(payload): ApiJson<ReflectionRequest>,
) -> Result<Json<ReflectionResponse>, AppError> {
    Ok(Json(generate_reflections(&payload)?))
}
