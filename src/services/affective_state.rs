use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::round_to;
use crate::validation::{self, ValidationError};

const NEUTRAL_EMOTION: &str = "neutral";
const NEUTRAL_CONFIDENCE: f64 = 0.2;

#[derive(Debug, Clone, Deserialize)]
pub struct AffectiveSignal {
    pub channel: String,
    pub emotion: String,
    pub intensity: f64,
    #[serde(default)]
    pub evidence: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AffectiveAnalysisRequest {
    pub student_id: String,
    pub current_task: String,
    pub affective_signals: Vec<AffectiveSignal>,
    #[serde(default)]
    pub recent_performance: Option<String>,
}

impl AffectiveAnalysisRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for signal in &self.affective_signals {
            validation::unit_interval("intensity", signal.intensity)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AffectiveState {
    pub dominant_emotion: String,
    pub confidence: f64,
    pub message: String,
    pub regulation_strategies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AffectiveAnalysisResponse {
    pub student_id: String,
    pub state: AffectiveState,
    pub nudges: Vec<String>,
}

/// Sums intensity per emotion; the heaviest wins, ties go to the smaller name.
fn aggregate_emotions(signals: &[AffectiveSignal]) -> (String, f64) {
    let mut weights: BTreeMap<String, f64> = BTreeMap::new();
    for signal in signals {
        *weights.entry(signal.emotion.to_lowercase()).or_insert(0.0) += signal.intensity;
    }

    let mut dominant: Option<(&String, f64)> = None;
    for (emotion, weight) in &weights {
        if dominant.map_or(true, |(_, best)| *weight > best) {
            dominant = Some((emotion, *weight));
        }
    }
    let Some((emotion, weight)) = dominant else {
        return (NEUTRAL_EMOTION.to_string(), NEUTRAL_CONFIDENCE);
    };

    let total: f64 = weights.values().sum();
    let confidence = if total > 0.0 { weight / total } else { 0.0 };
    (emotion.clone(), round_to(confidence, 3))
}

fn strategies(emotion: &str) -> [&'static str; 2] {
    match emotion {
        "frustration" | "anxious" | "stress" => [
            "给出分步提示并降低任务难度。",
            "安排 2 分钟呼吸或伸展休息。",
        ],
        "bored" | "disengaged" => [
            "引入情境化问题提升意义感。",
            "设置限时小挑战提高专注度。",
        ],
        "confident" | "excited" => [
            "提供扩展任务鼓励探索。",
            "邀请学生向同伴讲解巩固知识。",
        ],
        _ => [
            "询问学生状态，给予定制化支持。",
            "对当前努力给予正向反馈。",
        ],
    }
}

fn message(request: &AffectiveAnalysisRequest, emotion: &str) -> String {
    let student = &request.student_id;
    let mut message = match emotion {
        "frustration" | "anxious" => format!(
            "检测到 {student} 在「{}」中可能感到挫折。建议先处理最关键步骤。",
            request.current_task
        ),
        "bored" => format!("{student} 的情绪趋于低唤醒，可尝试切换更具挑战性的子任务。"),
        "confident" | "excited" => format!("{student} 状态积极，可趁势加入举一反三的问题。"),
        _ => format!("{student} 情绪较为平稳，保持当前节奏并轻量检查理解情况。"),
    };

    if let Some(performance) = request.recent_performance.as_deref().filter(|p| !p.is_empty()) {
        message.push_str(&format!(" 学习表现备注：{performance}。"));
    }
    message
}

pub fn analyze_affective_state(request: &AffectiveAnalysisRequest) -> AffectiveAnalysisResponse {
    let (dominant_emotion, confidence) = aggregate_emotions(&request.affective_signals);

    let state = AffectiveState {
        message: message(request, &dominant_emotion),
        regulation_strategies: strategies(&dominant_emotion)
            .iter()
            .map(|s| s.to_string())
            .collect(),
        dominant_emotion,
        confidence,
    };

    let nudges = vec![
        "使用 1-2 句同理心话语回应学生感受。".to_string(),
        format!("根据情绪状态对「{}」调整脚手架层级。", request.current_task),
    ];

    AffectiveAnalysisResponse {
        student_id: request.student_id.clone(),
        state,
        nudges,
    }
}
