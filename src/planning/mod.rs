//! Learning-path recommendation.
//!
//! Walks the prerequisite graph layer by layer (Kahn), ranks every layer by risk
//! tier and mastery gap, and keeps the concepts still below the mastery threshold
//! until the requested number is reached.
//!
//! - [`graph`] - prerequisite graph plus the config loader with built-in fallback
//! - [`mastery`] - mastery lookup and source resolution
//! - [`risk`] - mastery score to risk tier
//! - [`scheduler`] - lazy layered topological traversal
//! - [`ranking`] - per-layer ordering

pub mod graph;
pub mod mastery;
pub mod ranking;
pub mod risk;
pub mod scheduler;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::services::mastery_store::MasteryStore;

pub use graph::{load_graph, load_graph_from, FallbackReason, GraphOrigin, GraphSource, PrerequisiteGraph};
pub use mastery::{mastery_of, resolve_mastery, MasteryMap, MasterySource, ResolvedMastery};
pub use ranking::rank;
pub use risk::{classify, priority_rank, RiskTier};
pub use scheduler::{schedule, LayeredScheduler};

pub type Concept = String;

pub const MODEL_VERSION: &str = "rule-0.2-risk-first";
pub const DEFAULT_THRESHOLD: f64 = 0.7;
pub const DEFAULT_MAX_RECOMMEND: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub mastery: Option<MasteryMap>,
    pub student_id: Option<String>,
    pub threshold: f64,
    pub max_recommend: usize,
    pub request_id: String,
}

impl RecommendationRequest {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            mastery: None,
            student_id: None,
            threshold: DEFAULT_THRESHOLD,
            max_recommend: DEFAULT_MAX_RECOMMEND,
            request_id: request_id.into(),
        }
    }

    pub fn with_mastery(mut self, mastery: MasteryMap) -> Self {
        self.mastery = Some(mastery);
        self
    }

    pub fn with_student_id(mut self, student_id: impl Into<String>) -> Self {
        self.student_id = Some(student_id.into());
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_max_recommend(mut self, max_recommend: usize) -> Self {
        self.max_recommend = max_recommend;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub request_id: String,
    pub recommended_path: Vec<Concept>,
    pub model_version: String,
}

fn sanitize_threshold(threshold: f64) -> f64 {
    if threshold.is_finite() {
        threshold.clamp(0.0, 1.0)
    } else {
        DEFAULT_THRESHOLD
    }
}

/// Collects concepts below `threshold` from already-ranked layers, in order,
/// and stops pulling layers as soon as `max_count` concepts are collected.
pub fn accumulate<I>(
    ranked_layers: I,
    mastery: &MasteryMap,
    threshold: f64,
    max_count: usize,
) -> Vec<Concept>
where
    I: IntoIterator<Item = Vec<Concept>>,
{
    let mut recommended = Vec::new();
    if max_count == 0 {
        return recommended;
    }

    for layer in ranked_layers {
        for concept in layer {
            if mastery_of(mastery, &concept) < threshold {
                recommended.push(concept);
                if recommended.len() >= max_count {
                    return recommended;
                }
            }
        }
    }
    recommended
}

/// Pure recommendation over an already-resolved mastery snapshot.
pub fn recommend(
    graph: &PrerequisiteGraph,
    mastery: &MasteryMap,
    request: &RecommendationRequest,
) -> RecommendationResult {
    let threshold = sanitize_threshold(request.threshold);
    let mut layers_consumed = 0usize;

    let ranked_layers = LayeredScheduler::new(graph)
        .inspect(|_| layers_consumed += 1)
        .map(|layer| rank(layer, mastery));
    let recommended_path = accumulate(ranked_layers, mastery, threshold, request.max_recommend);

    debug!(
        request_id = %request.request_id,
        layers_consumed,
        recommended = recommended_path.len(),
        "learning path computed"
    );

    RecommendationResult {
        request_id: request.request_id.clone(),
        recommended_path,
        model_version: MODEL_VERSION.to_string(),
    }
}

/// Resolves mastery (request, then store, then empty) and recommends.
pub async fn plan(
    graph: &PrerequisiteGraph,
    store: &MasteryStore,
    request: &RecommendationRequest,
) -> RecommendationResult {
    let resolved = resolve_mastery(request, store).await;
    debug!(
        request_id = %request.request_id,
        source = ?resolved.source,
        concepts = resolved.mastery.len(),
        "mastery resolved"
    );
    recommend(graph, &resolved.mastery, request)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mastery(entries: &[(&str, f64)]) -> MasteryMap {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    fn names(items: &[&str]) -> Vec<Concept> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn diamond() -> PrerequisiteGraph {
        PrerequisiteGraph::from_adjacency([
            ("A", vec!["B", "C"]),
            ("B", vec!["D"]),
            ("C", vec!["D", "E"]),
            ("D", vec![]),
            ("E", vec![]),
        ])
    }

    #[test]
    fn test_risk_first_example() {
        let m = mastery(&[("A", 0.9), ("B", 0.5), ("C", 0.95), ("D", 0.3), ("E", 0.3)]);
        let request = RecommendationRequest::new("req-1").with_max_recommend(3);

        let result = recommend(&diamond(), &m, &request);

        assert_eq!(result.request_id, "req-1");
        assert_eq!(result.recommended_path, names(&["B", "D", "E"]));
        assert_eq!(result.model_version, MODEL_VERSION);
    }

    #[test]
    fn test_independent_roots_with_empty_mastery() {
        let graph = PrerequisiteGraph::from_adjacency([("Y", Vec::<&str>::new()), ("X", Vec::new())]);
        let request = RecommendationRequest::new("req-2").with_max_recommend(2);

        let result = recommend(&graph, &MasteryMap::new(), &request);
        assert_eq!(result.recommended_path, names(&["X", "Y"]));
    }

    #[test]
    fn test_cap_stops_mid_layer() {
        let m = mastery(&[("A", 0.1)]);
        let request = RecommendationRequest::new("r").with_max_recommend(2);

        let result = recommend(&diamond(), &m, &request);
        assert_eq!(result.recommended_path, names(&["A", "B"]));
    }

    #[test]
    fn test_mastered_prerequisite_still_unlocks_successors() {
        let graph = PrerequisiteGraph::from_adjacency([("base", vec!["next"])]);
        let m = mastery(&[("base", 1.0)]);

        let result = recommend(&graph, &m, &RecommendationRequest::new("r"));
        assert_eq!(result.recommended_path, names(&["next"]));
    }

    #[test]
    fn test_threshold_is_strict() {
        let graph = PrerequisiteGraph::from_adjacency([("A", Vec::<&str>::new()), ("B", Vec::new())]);
        let m = mastery(&[("A", 0.7), ("B", 0.69)]);

        let result = recommend(&graph, &m, &RecommendationRequest::new("r"));
        assert_eq!(result.recommended_path, names(&["B"]));
    }

    #[test]
    fn test_cycle_concepts_never_recommended() {
        let graph = PrerequisiteGraph::from_adjacency([
            ("A", vec!["B"]),
            ("B", vec!["C"]),
            ("C", vec!["B", "D"]),
            ("E", vec![]),
        ]);

        let result = recommend(&graph, &MasteryMap::new(), &RecommendationRequest::new("r"));
        assert_eq!(result.recommended_path, names(&["A", "E"]));
    }

    #[test]
    fn test_zero_cap_yields_empty() {
        let request = RecommendationRequest::new("r").with_max_recommend(0);
        let result = recommend(&diamond(), &MasteryMap::new(), &request);
        assert!(result.recommended_path.is_empty());
    }

    #[test]
    fn test_out_of_range_threshold_is_clamped() {
        let m = mastery(&[("A", 1.0), ("B", 0.2), ("C", 0.2), ("D", 0.2), ("E", 0.2)]);

        let high = recommend(&diamond(), &m, &RecommendationRequest::new("r").with_threshold(7.0));
        assert_eq!(high.recommended_path, names(&["B", "C", "D", "E"]));

        let negative = recommend(&diamond(), &m, &RecommendationRequest::new("r").with_threshold(-1.0));
        assert!(negative.recommended_path.is_empty());

        let nan = recommend(&diamond(), &m, &RecommendationRequest::new("r").with_threshold(f64::NAN));
        assert_eq!(nan.recommended_path, names(&["B", "C", "D", "E"]));
    }

    #[test]
    fn test_accumulate_filters_and_caps() {
        let layers = vec![names(&["a", "b"]), names(&["c", "d"])];
        let m = mastery(&[("a", 0.9), ("c", 0.1)]);

        assert_eq!(accumulate(layers.clone(), &m, 0.7, 10), names(&["b", "c", "d"]));
        assert_eq!(accumulate(layers, &m, 0.7, 2), names(&["b", "c"]));
    }

    #[test]
    fn test_builtin_graph_starts_at_root() {
        let graph = PrerequisiteGraph::builtin();
        let result = recommend(&graph, &MasteryMap::new(), &RecommendationRequest::new("r"));

        assert_eq!(result.recommended_path.len(), DEFAULT_MAX_RECOMMEND);
        assert_eq!(result.recommended_path[0], "集合论基础");
    }

    #[tokio::test]
    async fn test_plan_uses_store_when_request_has_no_mastery() {
        let store = MasteryStore::in_memory();
        store
            .store("s1", mastery(&[("A", 0.9), ("B", 0.9), ("C", 0.1)]))
            .await
            .unwrap();
        let request = RecommendationRequest::new("r").with_student_id("s1");

        let result = plan(&diamond(), &store, &request).await;
        assert_eq!(result.recommended_path, names(&["C", "D", "E"]));
    }
}
