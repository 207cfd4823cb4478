//! Rule-based cognitive diagnosis over per-concept attempt counts.
//!
//! Levels share the risk tiers used by the learning-path planner, so a concept
//! reported here as high risk is exactly one the planner would rank first.

use serde::{Deserialize, Serialize};

use super::round_to;
use crate::planning::risk::{classify, RiskTier};
use crate::validation::{self, ValidationError};

#[derive(Debug, Clone, Deserialize)]
pub struct ConceptSnapshot {
    pub concept_name: String,
    pub attempts: i64,
    pub correct: i64,
    #[serde(default)]
    pub misconceptions: Vec<String>,
}

impl ConceptSnapshot {
    pub fn mastery(&self) -> f64 {
        if self.attempts <= 0 {
            return 0.0;
        }
        (self.correct as f64 / self.attempts as f64).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CognitiveDiagnosisRequest {
    pub student_id: String,
    pub subject: String,
    pub concept_snapshots: Vec<ConceptSnapshot>,
    #[serde(default)]
    pub recent_behaviors: Option<Vec<String>>,
}

impl CognitiveDiagnosisRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for snapshot in &self.concept_snapshots {
            validation::positive("attempts", snapshot.attempts)?;
            if snapshot.correct < 0 {
                return Err(ValidationError::OutOfRange {
                    field: "correct",
                    min: 0.0,
                    max: snapshot.attempts as f64,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConceptDiagnosis {
    pub concept_name: String,
    pub mastery: f64,
    pub level: String,
    pub tier: RiskTier,
    pub misconceptions: Vec<String>,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CognitiveDiagnosisResponse {
    pub student_id: String,
    pub subject: String,
    pub overall_mastery: f64,
    pub strengths: Vec<String>,
    pub risks: Vec<String>,
    pub concepts: Vec<ConceptDiagnosis>,
    pub summary: String,
}

fn recommendation(snapshot: &ConceptSnapshot, tier: RiskTier) -> String {
    match tier {
        RiskTier::Stable => "通过挑战性任务保持迁移练习。".to_string(),
        RiskTier::Developing => {
            let focus = snapshot
                .misconceptions
                .first()
                .map(String::as_str)
                .unwrap_or("易错点");
            format!("安排变式练习，突出对比 {focus}。")
        }
        RiskTier::HighRisk => "回到概念本源，结合具体例子重新建模。".to_string(),
    }
}

pub fn diagnose_cognition(request: &CognitiveDiagnosisRequest) -> CognitiveDiagnosisResponse {
    let mut concepts = Vec::with_capacity(request.concept_snapshots.len());
    let mut strengths = Vec::new();
    let mut risks = Vec::new();

    for snapshot in &request.concept_snapshots {
        let mastery = round_to(snapshot.mastery(), 3);
        let tier = classify(mastery);
        match tier {
            RiskTier::Stable => strengths.push(snapshot.concept_name.clone()),
            RiskTier::HighRisk => risks.push(snapshot.concept_name.clone()),
            RiskTier::Developing => {}
        }
        concepts.push(ConceptDiagnosis {
            concept_name: snapshot.concept_name.clone(),
            mastery,
            level: tier.label().to_string(),
            tier,
            misconceptions: snapshot.misconceptions.clone(),
            recommendation: recommendation(snapshot, tier),
        });
    }

    let overall_mastery = if request.concept_snapshots.is_empty() {
        0.0
    } else {
        let total: f64 = request.concept_snapshots.iter().map(ConceptSnapshot::mastery).sum();
        round_to(total / request.concept_snapshots.len() as f64, 3)
    };

    let behavior_note = match &request.recent_behaviors {
        Some(behaviors) if !behaviors.is_empty() => format!("行为观察：{}。", behaviors.join("、")),
        _ => String::new(),
    };

    let strengths_text = if strengths.is_empty() {
        "暂未形成亮点".to_string()
    } else {
        strengths.join(", ")
    };
    let risks_text = if risks.is_empty() {
        "暂无".to_string()
    } else {
        risks.join(", ")
    };

    let summary = format!(
        "{} 在 {} 中整体掌握度约为 {:.0}%。优势概念：{}；风险概念：{}。{}",
        request.student_id,
        request.subject,
        overall_mastery * 100.0,
        strengths_text,
        risks_text,
        behavior_note
    );

    CognitiveDiagnosisResponse {
        student_id: request.student_id.clone(),
        subject: request.subject.clone(),
        overall_mastery,
        strengths,
        risks,
        concepts,
        summary,
    }
}
