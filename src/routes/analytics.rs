use axum::routing::post;
use axum::{Json, Router};

use crate::extract::ApiJson;
use crate::response::AppError;
use crate::services::cdm::{self, run_inference_cdm, Interaction, MasteryResponse};
use crate::services::cognitive_diagnosis::{
    diagnose_cognition, CognitiveDiagnosisRequest, CognitiveDiagnosisResponse,
};
use crate::services::knowledge_tracing::{
    trace_knowledge, KnowledgeTracingRequest, KnowledgeTracingResponse,
};
use crate::services::kt::{self, run_inference_kt, KTResponse, StudentInteraction};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cognitive-diagnosis", post(cognitive_diagnosis))
        .route("/knowledge-tracing", post(knowledge_tracing))
        .route("/cdm/mastery", post(cdm_mastery))
        .route("/kt/predict", post(kt_predict))
}

async fn cognitive_diagnosis(
    ApiJson(payload): ApiJson<CognitiveDiagnosisRequest>,
) -> Result<Json<CognitiveDiagnosisResponse>, AppError> {
    payload.validate()?;
    Ok(Json(diagnose_cognition(&payload)))
}

async fn knowledge_tracing(
    ApiJson(payload): ApiJson<KnowledgeTracingRequest>,
) -> Result<Json<KnowledgeTracingResponse>, AppError> {
    payload.validate()?;
    Ok(Json(trace_knowledge(&payload)))
}

async fn cdm_mastery(
    ApiJson(interactions): ApiJson<Vec<Interaction>>,
) -> Result<Json<MasteryResponse>, AppError> {
    cdm::validate_interactions(&interactions)?;
    Ok(Json(run_inference_cdm(&interactions)))
}

async fn kt_predict(
    ApiJson(interactions): ApiJson<Vec<StudentInteraction>>,
) -> Result<Json<KTResponse>, AppError> {
    kt::validate_interactions(&interactions)?;
    Ok(Json(run_inference_kt(&interactions)))
}
