//! Property-based tests for learning-path recommendation
//!
//! Invariants covered:
//! - Determinism: identical inputs give identical paths
//! - Prerequisite order: a recommended concept never precedes a recommended prerequisite
//! - Cap and threshold: at most max_recommend concepts, all strictly below threshold
//! - Risk-first layers: within one layer, priority never increases along the path
//! - Cycle safety: concepts on or behind a cycle are never recommended

use std::collections::{BTreeMap, HashMap, HashSet};

use proptest::prelude::*;

use edu_minimodels::planning::{
    classify, mastery_of, recommend, schedule, Concept, MasteryMap, PrerequisiteGraph,
    RecommendationRequest,
};

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn concept_name(index: usize) -> Concept {
    format!("c{index:02}")
}

fn arb_score() -> impl Strategy<Value = f64> {
    (0u64..=1000u64).prop_map(|v| v as f64 / 1000.0)
}

/// Edges only point from lower to higher index, so the graph is acyclic.
fn arb_dag() -> impl Strategy<Value = PrerequisiteGraph> {
    (2usize..12).prop_flat_map(|size| {
        proptest::collection::vec((0..size, 0..size), 0..size * 2).prop_map(move |pairs| {
            let mut adjacency: BTreeMap<Concept, Vec<Concept>> =
                (0..size).map(|i| (concept_name(i), Vec::new())).collect();
            for (a, b) in pairs {
                if a < b {
                    adjacency.entry(concept_name(a)).or_default().push(concept_name(b));
                }
            }
            PrerequisiteGraph::new(adjacency)
        })
    })
}

fn arb_mastery(graph: &PrerequisiteGraph) -> impl Strategy<Value = MasteryMap> {
    let names: Vec<Concept> = graph.concepts().into_iter().map(str::to_string).collect();
    proptest::collection::vec(proptest::option::of(arb_score()), names.len()).prop_map(
        move |scores| {
            names
                .iter()
                .zip(scores)
                .filter_map(|(name, score)| score.map(|s| (name.clone(), s)))
                .collect()
        },
    )
}

fn arb_case() -> impl Strategy<Value = (PrerequisiteGraph, MasteryMap, f64, usize)> {
    arb_dag().prop_flat_map(|graph| {
        let mastery = arb_mastery(&graph);
        (Just(graph), mastery, arb_score(), 0usize..8)
    })
}

fn request(threshold: f64, max_recommend: usize) -> RecommendationRequest {
    RecommendationRequest::new("pbt")
        .with_threshold(threshold)
        .with_max_recommend(max_recommend)
}

fn layer_index(graph: &PrerequisiteGraph) -> HashMap<Concept, usize> {
    schedule(graph)
        .into_iter()
        .enumerate()
        .flat_map(|(i, layer)| layer.into_iter().map(move |c| (c, i)))
        .collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_recommendation_is_deterministic((graph, mastery, threshold, cap) in arb_case()) {
        let first = recommend(&graph, &mastery, &request(threshold, cap));
        let second = recommend(&graph, &mastery, &request(threshold, cap));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_cap_and_threshold_hold((graph, mastery, threshold, cap) in arb_case()) {
        let result = recommend(&graph, &mastery, &request(threshold, cap));

        prop_assert!(result.recommended_path.len() <= cap);
        let unique: HashSet<&Concept> = result.recommended_path.iter().collect();
        prop_assert_eq!(unique.len(), result.recommended_path.len());
        for concept in &result.recommended_path {
            prop_assert!(mastery_of(&mastery, concept) < threshold);
        }
    }

    #[test]
    fn prop_prerequisites_come_first((graph, mastery, threshold, cap) in arb_case()) {
        let result = recommend(&graph, &mastery, &request(threshold, cap));
        let position: HashMap<&Concept, usize> = result
            .recommended_path
            .iter()
            .enumerate()
            .map(|(i, c)| (c, i))
            .collect();

        for (from, successors) in graph.adjacency() {
            for to in successors {
                if let (Some(a), Some(b)) = (position.get(from), position.get(to)) {
                    prop_assert!(a < b, "{} recommended after its dependent {}", from, to);
                }
            }
        }
    }

    #[test]
    fn prop_risk_first_within_layer((graph, mastery, threshold, cap) in arb_case()) {
        let result = recommend(&graph, &mastery, &request(threshold, cap));
        let layers = layer_index(&graph);

        for pair in result.recommended_path.windows(2) {
            if layers[&pair[0]] == layers[&pair[1]] {
                let first = classify(mastery_of(&mastery, &pair[0])).priority_rank();
                let second = classify(mastery_of(&mastery, &pair[1])).priority_rank();
                prop_assert!(first >= second);
            }
        }
    }

    #[test]
    fn prop_uncapped_full_threshold_covers_dag(graph in arb_dag()) {
        let total = graph.concepts().len();
        let result = recommend(&graph, &MasteryMap::new(), &request(1.0, total));
        prop_assert_eq!(result.recommended_path.len(), total);
    }

    #[test]
    fn prop_cycle_members_never_recommended(graph in arb_dag(), extra in 0usize..4) {
        // Close a two-node cycle between fresh concepts hanging off the last one.
        let mut adjacency = graph.adjacency().clone();
        let last = adjacency.keys().next_back().cloned().unwrap();
        adjacency.entry(last).or_default().push("loop_a".to_string());
        adjacency.insert("loop_a".to_string(), vec!["loop_b".to_string()]);
        adjacency.insert("loop_b".to_string(), vec!["loop_a".to_string(), "behind".to_string()]);
        let cyclic = PrerequisiteGraph::new(adjacency);

        let cap = graph.concepts().len() + extra + 3;
        let result = recommend(&cyclic, &MasteryMap::new(), &request(1.0, cap));

        for blocked in ["loop_a", "loop_b", "behind"] {
            prop_assert!(!result.recommended_path.iter().any(|c| c == blocked));
        }
        prop_assert_eq!(result.recommended_path.len(), graph.concepts().len());
    }
}
