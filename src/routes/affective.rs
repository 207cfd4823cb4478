use axum::routing::post;
use axum::{Json, Router};

use crate::extract::ApiJson;
use crate::response::AppError;
use crate::services::affective_state::{
    analyze_affective_state, AffectiveAnalysisRequest, AffectiveAnalysisResponse,
};
use crate::services::sentiment::{
    run_inference_aspect_sentiment, run_inference_intensity, run_inference_sentiment,
    AspectSentimentRequest, AspectSentimentResponse, IntensityRequest, IntensityResponse,
    SentimentRequest, SentimentResponse,
};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/affective-analysis", post(affective_analysis))
        .route("/sentiment/analyze", post(analyze_sentiment))
        .route("/sentiment/aspect", post(analyze_aspect_sentiment))
        .route("/sentiment/intensity", post(analyze_intensity))
}

async fn affective_analysis(
    ApiJson(payload): ApiJson<AffectiveAnalysisRequest>,
) -> Result<Json<AffectiveAnalysisResponse>, AppError> {
    payload.validate()?;
    Ok(Json(analyze_affective_state(&payload)))
}

async fn analyze_sentiment(
    ApiJson(payload): ApiJson<SentimentRequest>,
) -> Json<SentimentResponse> {
    Json(run_inference_sentiment(&payload.text))
}

async fn analyze_aspect_sentiment(
    ApiJson(payload): ApiJson<AspectSentimentRequest>,
) -> Json<AspectSentimentResponse> {
    Json(run_inference_aspect_sentiment(&payload.text, &payload.aspects))
}

async fn analyze_intensity(
    ApiJson(payload): ApiJson<IntensityRequest>,
) -> Json<IntensityResponse> {
    Json(run_inference_intensity(&payload.text))
}
