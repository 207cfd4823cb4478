use std::collections::BTreeMap;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::extract::ApiJson;
use crate::planning::{
    self, schedule, Concept, GraphOrigin, MasteryMap, RecommendationRequest,
    RecommendationResult, DEFAULT_MAX_RECOMMEND, DEFAULT_THRESHOLD,
};
use crate::response::AppError;
use crate::state::AppState;
use crate::validation::{self, ValidationError};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/path/recommend", post(recommend_path))
        .route("/path/graph", get(describe_graph))
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_max_recommend() -> i64 {
    DEFAULT_MAX_RECOMMEND as i64
}

#[derive(Debug, Deserialize)]
struct RecommendPathRequest {
    #[serde(default)]
    mastery: Option<MasteryMap>,
    #[serde(default)]
    student_id: Option<String>,
    #[serde(default = "default_threshold")]
    threshold: f64,
    #[serde(default = "default_max_recommend")]
    max_recommend: i64,
    #[serde(default)]
    request_id: Option<String>,
}

impl RecommendPathRequest {
    fn into_request(self) -> Result<RecommendationRequest, ValidationError> {
        validation::unit_interval("threshold", self.threshold)?;
        validation::positive("max_recommend", self.max_recommend)?;
        if let Some(mastery) = &self.mastery {
            for score in mastery.values() {
                validation::unit_interval("mastery", *score)?;
            }
        }

        let request_id = self
            .request_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Ok(RecommendationRequest {
            mastery: self.mastery,
            student_id: self.student_id.filter(|id| !id.trim().is_empty()),
            threshold: self.threshold,
            max_recommend: usize::try_from(self.max_recommend).unwrap_or(usize::MAX),
            request_id,
        })
    }
}

async fn recommend_path(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RecommendPathRequest>,
) -> Result<Json<RecommendationResult>, AppError> {
    let request = payload.into_request()?;
    let result = planning::plan(&state.graph().graph, state.mastery_store(), &request).await;
    Ok(Json(result))
}

#[derive(Serialize)]
struct GraphDescription<'a> {
    origin: &'a GraphOrigin,
    concept_count: usize,
    edge_count: usize,
    adjacency: &'a BTreeMap<Concept, Vec<Concept>>,
    layers: Vec<Vec<Concept>>,
}

async fn describe_graph(State(state): State<AppState>) -> Response {
    let source = state.graph();
    let description = GraphDescription {
        origin: &source.origin,
        concept_count: source.graph.concepts().len(),
        edge_count: source.graph.edge_count(),
        adjacency: source.graph.adjacency(),
        layers: schedule(&source.graph),
    };
    Json(description).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: serde_json::Value) -> RecommendPathRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_defaults_and_generated_request_id() {
        let request = parse(serde_json::json!({})).into_request().unwrap();

        assert_eq!(request.threshold, DEFAULT_THRESHOLD);
        assert_eq!(request.max_recommend, DEFAULT_MAX_RECOMMEND);
        assert!(Uuid::parse_str(&request.request_id).is_ok());
        assert!(request.mastery.is_none());
    }

    #[test]
    fn test_blank_ids_are_dropped() {
        let request = parse(serde_json::json!({"student_id": "  ", "request_id": ""}))
            .into_request()
            .unwrap();

        assert!(request.student_id.is_none());
        assert!(!request.request_id.is_empty());
    }

    #[test]
    fn test_huge_cap_is_not_reset_to_default() {
        let request = parse(serde_json::json!({"max_recommend": i64::MAX}))
            .into_request()
            .unwrap();
        assert!(request.max_recommend >= u32::MAX as usize);
    }

    #[test]
    fn test_rejects_out_of_range_mastery() {
        let err = parse(serde_json::json!({"mastery": {"A": 1.2}}))
            .into_request()
            .unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "mastery", .. }));
    }
}
