//! MRTKT/DKVMN-shaped placeholder: next-answer probability from accuracy and pacing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::round_to;
use crate::validation::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct StudentInteraction {
    pub item_id: i64,
    pub correct: u8,
    pub timestamp: f64,
}

pub fn validate_interactions(interactions: &[StudentInteraction]) -> Result<(), ValidationError> {
    if interactions.iter().any(|it| it.correct > 1) {
        return Err(ValidationError::InvalidChoice {
            field: "correct",
            allowed: "0 或 1",
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KTResponse {
    pub next_question_correct_prob: f64,
    pub mastery: BTreeMap<String, f64>,
}

/// Maps the mean (non-negative) gap between answers onto a factor in [0.7, 1.0].
fn time_decay_adjustment(timestamps: &[f64]) -> f64 {
    if timestamps.len() < 2 {
        return 1.0;
    }
    let gaps: Vec<f64> = timestamps.windows(2).map(|w| (w[1] - w[0]).max(0.0)).collect();
    let avg_gap = gaps.iter().sum::<f64>() / gaps.len() as f64;
    (1.0 - avg_gap * 0.01).clamp(0.7, 1.0)
}

pub fn run_inference_kt(interactions: &[StudentInteraction]) -> KTResponse {
    let Some(last) = interactions.last() else {
        return KTResponse {
            next_question_correct_prob: 0.5,
            mastery: BTreeMap::from([("K1".to_string(), 0.5)]),
        };
    };

    let correct_count: f64 = interactions.iter().map(|it| f64::from(it.correct)).sum();
    let accuracy = correct_count / interactions.len() as f64;
    let timestamps: Vec<f64> = interactions.iter().map(|it| it.timestamp).collect();
    let time_decay = time_decay_adjustment(&timestamps);

    let base_prob = accuracy * 0.8 + 0.1;
    let prob = (base_prob * time_decay).clamp(0.05, 0.95);

    let k2 = if accuracy > 0.6 { prob * 1.05 } else { prob * 0.9 };
    let mastery = BTreeMap::from([
        ("K1".to_string(), round_to(prob * 0.95, 3)),
        ("K2".to_string(), round_to(k2, 3)),
        ("K3".to_string(), round_to(prob, 3)),
    ]);

    let next_prob = (prob + 0.05 * (f64::from(last.correct) - 0.5)).clamp(0.05, 0.95);

    KTResponse {
        next_question_correct_prob: round_to(next_prob, 3),
        mastery,
    }
}
