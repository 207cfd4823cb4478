//! DeepIRT-shaped placeholder: maps answer accuracy onto a small mastery vector.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

const NEUTRAL_VECTOR: [f64; 3] = [0.5, 0.5, 0.5];

#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    pub student_id: i64,
    pub item_id: i64,
    pub correct: u8,
}

pub fn validate_interactions(interactions: &[Interaction]) -> Result<(), ValidationError> {
    if interactions.iter().any(|it| it.correct > 1) {
        return Err(ValidationError::InvalidChoice {
            field: "correct",
            allowed: "0 或 1",
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MasteryResponse {
    pub mastery: BTreeMap<String, f64>,
    pub raw_vector: Vec<f64>,
}

fn predict(correctness: &[u8]) -> [f64; 3] {
    if correctness.is_empty() {
        return NEUTRAL_VECTOR;
    }
    let accuracy =
        correctness.iter().map(|&c| f64::from(c)).sum::<f64>() / correctness.len() as f64;

    [
        (accuracy * 0.9 + 0.1).clamp(0.05, 0.95),
        (accuracy * 0.8 + 0.15).clamp(0.05, 0.95),
        accuracy.clamp(0.05, 0.95),
    ]
}

pub fn run_inference_cdm(interactions: &[Interaction]) -> MasteryResponse {
    let correctness: Vec<u8> = interactions.iter().map(|it| it.correct).collect();
    let raw_vector = predict(&correctness).to_vec();
    let mastery = raw_vector
        .iter()
        .enumerate()
        .map(|(idx, prob)| (format!("K{}", idx + 1), *prob))
        .collect();

    MasteryResponse {
        mastery,
        raw_vector,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interactions(correct: &[u8]) -> Vec<Interaction> {
        correct
            .iter()
            .enumerate()
            .map(|(i, &c)| Interaction {
                student_id: 1,
                item_id: i as i64,
                correct: c,
            })
            .collect()
    }

    #[test]
    fn test_empty_sequence_is_neutral() {
        let response = run_inference_cdm(&[]);
        assert_eq!(response.raw_vector, vec![0.5, 0.5, 0.5]);
        assert_eq!(response.mastery.len(), 3);
    }

    #[test]
    fn test_all_correct_is_clamped() {
        let response = run_inference_cdm(&interactions(&[1, 1, 1, 1]));
        assert_eq!(response.raw_vector, vec![0.95, 0.95, 0.95]);
        assert_eq!(response.mastery["K1"], 0.95);
    }

    #[test]
    fn test_all_wrong_has_floor() {
        let response = run_inference_cdm(&interactions(&[0, 0]));
        assert_eq!(response.raw_vector, vec![0.1, 0.15, 0.05]);
    }

    #[test]
    fn test_correct_must_be_binary() {
        assert!(validate_interactions(&interactions(&[1, 2])).is_err());
        assert!(validate_interactions(&interactions(&[1, 0])).is_ok());
    }
}
