use serde::Serialize;

use super::mastery::{mastery_of, MasteryMap};
use super::risk::{classify, RiskTier};
use super::Concept;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredConcept {
    pub concept: Concept,
    pub tier: RiskTier,
    pub gap: f64,
}

pub fn score(concept: Concept, mastery: &MasteryMap) -> ScoredConcept {
    let m = mastery_of(mastery, &concept);
    ScoredConcept {
        concept,
        tier: classify(m),
        gap: 1.0 - m,
    }
}

/// Orders one layer by risk tier, then by mastery gap, both descending.
///
/// The sort is stable, so equal keys keep the layer's incoming order (concept
/// name, as produced by the scheduler).
pub fn rank_scored(layer: Vec<Concept>, mastery: &MasteryMap) -> Vec<ScoredConcept> {
    let mut scored: Vec<ScoredConcept> = layer
        .into_iter()
        .map(|concept| score(concept, mastery))
        .collect();

    scored.sort_by(|a, b| {
        b.tier
            .priority_rank()
            .cmp(&a.tier.priority_rank())
            .then_with(|| b.gap.total_cmp(&a.gap))
    });
    scored
}

pub fn rank(layer: Vec<Concept>, mastery: &MasteryMap) -> Vec<Concept> {
    rank_scored(layer, mastery)
        .into_iter()
        .map(|scored| scored.concept)
        .collect()
}
