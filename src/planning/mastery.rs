use std::collections::HashMap;

use serde::Serialize;

use super::{Concept, RecommendationRequest};
use crate::services::mastery_store::MasteryStore;

pub type MasteryMap = HashMap<Concept, f64>;

/// Non-finite scores read as 0.0; everything else is clamped into [0, 1].
pub fn sanitize_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Absent concepts are indistinguishable from unmastered ones.
pub fn mastery_of(mastery: &MasteryMap, concept: &str) -> f64 {
    mastery
        .get(concept)
        .copied()
        .map(sanitize_score)
        .unwrap_or(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MasterySource {
    Request,
    Store,
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMastery {
    pub mastery: MasteryMap,
    pub source: MasterySource,
}

/// Picks exactly one source: a non-empty map on the request, else the store
/// entry for the student, else nothing. Sources are never merged.
pub async fn resolve_mastery(
    request: &RecommendationRequest,
    store: &MasteryStore,
) -> ResolvedMastery {
    if let Some(mastery) = request.mastery.as_ref().filter(|m| !m.is_empty()) {
        return ResolvedMastery {
            mastery: mastery.clone(),
            source: MasterySource::Request,
        };
    }

    if let Some(student_id) = request.student_id.as_deref() {
        return ResolvedMastery {
            mastery: store.lookup(student_id).await,
            source: MasterySource::Store,
        };
    }

    ResolvedMastery {
        mastery: MasteryMap::new(),
        source: MasterySource::Empty,
    }
}
