//! Heuristic Bayesian knowledge tracing.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::round_to;
use crate::validation::{self, ValidationError};

const DEFAULT_PRIOR: f64 = 0.5;
const LEARNING_RATE: f64 = 0.3;
const FORGETTING: f64 = 0.4;
const SLOW_ANSWER_SECONDS: i64 = 120;
const SLOW_ANSWER_PENALTY: f64 = 0.05;

#[derive(Debug, Clone, Deserialize)]
pub struct SkillInteraction {
    pub skill: String,
    pub correct: bool,
    #[serde(default)]
    pub time_spent_seconds: Option<i64>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeTracingRequest {
    pub student_id: String,
    pub interactions: Vec<SkillInteraction>,
    #[serde(default)]
    pub prior_mastery: HashMap<String, f64>,
}

impl KnowledgeTracingRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for interaction in &self.interactions {
            if let Some(confidence) = interaction.confidence {
                validation::unit_interval("confidence", confidence)?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    #[serde(rename = "上升")]
    Rising,
    #[serde(rename = "下降")]
    Falling,
    #[serde(rename = "平稳")]
    Steady,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillProgress {
    pub skill: String,
    pub probability_mastery: f64,
    pub trend: Trend,
    pub next_action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnowledgeTracingResponse {
    pub student_id: String,
    pub skills: Vec<SkillProgress>,
    pub recommended_sequence: Vec<String>,
}

fn update_probability(prob: f64, interaction: &SkillInteraction) -> f64 {
    let mut prob = prob.clamp(0.001, 0.999);

    if interaction.correct {
        prob += (1.0 - prob) * LEARNING_RATE;
    } else {
        prob *= FORGETTING;
    }

    if let Some(confidence) = interaction.confidence {
        prob = 0.7 * prob + 0.3 * confidence;
    }

    if interaction
        .time_spent_seconds
        .is_some_and(|seconds| seconds > SLOW_ANSWER_SECONDS)
    {
        prob -= SLOW_ANSWER_PENALTY;
    }

    prob.clamp(0.0, 1.0)
}

fn trend(history: &[bool]) -> Trend {
    match history {
        [.., true, true] => Trend::Rising,
        [.., false] => Trend::Falling,
        _ => Trend::Steady,
    }
}

fn next_action(probability: f64) -> &'static str {
    if probability >= 0.85 {
        "安排挑战题巩固迁移。"
    } else if probability >= 0.6 {
        "保持混合题训练，关注错误类型。"
    } else {
        "回到基础例题，配合讲解反馈。"
    }
}

pub fn trace_knowledge(request: &KnowledgeTracingRequest) -> KnowledgeTracingResponse {
    let mut probabilities: BTreeMap<String, f64> = request
        .prior_mastery
        .iter()
        .map(|(skill, prob)| (skill.clone(), *prob))
        .collect();
    let mut history: HashMap<&str, Vec<bool>> = HashMap::new();

    for interaction in &request.interactions {
        let prob = probabilities
            .entry(interaction.skill.clone())
            .or_insert(DEFAULT_PRIOR);
        *prob = update_probability(*prob, interaction);
        history
            .entry(interaction.skill.as_str())
            .or_default()
            .push(interaction.correct);
    }

    let skills: Vec<SkillProgress> = probabilities
        .into_iter()
        .map(|(skill, probability)| {
            let recent = history.get(skill.as_str()).map(Vec::as_slice).unwrap_or_default();
            SkillProgress {
                trend: trend(recent),
                next_action: next_action(probability).to_string(),
                probability_mastery: round_to(probability, 3),
                skill,
            }
        })
        .collect();

    let mut ordered: Vec<&SkillProgress> = skills.iter().collect();
    ordered.sort_by(|a, b| a.probability_mastery.total_cmp(&b.probability_mastery));
    let recommended_sequence = ordered.into_iter().map(|s| s.skill.clone()).collect();

    KnowledgeTracingResponse {
        student_id: request.student_id.clone(),
        skills,
        recommended_sequence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interaction(skill: &str, correct: bool) -> SkillInteraction {
        SkillInteraction {
            skill: skill.to_string(),
            correct,
            time_spent_seconds: None,
            confidence: None,
        }
    }

    fn request(interactions: Vec<SkillInteraction>, prior: &[(&str, f64)]) -> KnowledgeTracingRequest {
        KnowledgeTracingRequest {
            student_id: "s1".to_string(),
            interactions,
            prior_mastery: prior.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }

    #[test]
    fn test_correct_answer_moves_towards_one() {
        let updated = update_probability(0.5, &interaction("a", true));
        assert!((updated - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_wrong_answer_with_confidence_and_slow_time() {
        let slow = SkillInteraction {
            confidence: Some(1.0),
            time_spent_seconds: Some(300),
            ..interaction("a", false)
        };
        // 0.5 * 0.4 = 0.2, blended 0.7 * 0.2 + 0.3 = 0.44, minus 0.05
        assert!((update_probability(0.5, &slow) - 0.39).abs() < 1e-9);
    }

    #[test]
    fn test_trend_rules() {
        assert_eq!(trend(&[false, true, true]), Trend::Rising);
        assert_eq!(trend(&[true, false]), Trend::Falling);
        assert_eq!(trend(&[true]), Trend::Steady);
        assert_eq!(trend(&[]), Trend::Steady);
    }

    #[test]
    fn test_prior_only_skills_are_reported() {
        let response = trace_knowledge(&request(
            vec![interaction("b", true), interaction("b", true)],
            &[("a", 0.9)],
        ));

        assert_eq!(response.skills.len(), 2);
        assert_eq!(response.skills[0].skill, "a");
        assert_eq!(response.skills[0].trend, Trend::Steady);
        assert_eq!(response.skills[1].trend, Trend::Rising);
        assert_eq!(response.skills[1].probability_mastery, 0.755);
        assert_eq!(response.recommended_sequence, vec!["b", "a"]);
    }

    #[test]
    fn test_validate_confidence_range() {
        let bad = SkillInteraction {
            confidence: Some(1.5),
            ..interaction("a", true)
        };
        assert!(request(vec![bad], &[]).validate().is_err());
    }
}
