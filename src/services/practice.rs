//! Three-phase practice plan builder.

use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationError};

const MIN_SEGMENT_MINUTES: i64 = 5;

fn default_available_minutes() -> i64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct PracticePlanRequest {
    pub topic: String,
    pub student_level: String,
    #[serde(default)]
    pub weak_points: Vec<String>,
    #[serde(default = "default_available_minutes")]
    pub available_minutes: i64,
}

impl PracticePlanRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::positive("available_minutes", self.available_minutes)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PracticePhase {
    pub name: String,
    pub duration_minutes: i64,
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PracticePlanResponse {
    pub topic: String,
    pub student_level: String,
    pub total_minutes: i64,
    pub weak_points: Vec<String>,
    pub phases: Vec<PracticePhase>,
}

pub fn build_practice_plan(request: &PracticePlanRequest) -> PracticePlanResponse {
    let weak_points: Vec<String> = request
        .weak_points
        .iter()
        .map(|item| item.trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect();
    let segment = (request.available_minutes / 3).max(MIN_SEGMENT_MINUTES);

    let mut targeted = vec!["完成 2-3 道示例题，记录错误原因".to_string()];
    if !weak_points.is_empty() {
        targeted.insert(0, format!("优先攻克：{}", weak_points.join(", ")));
    }

    let phases = vec![
        PracticePhase {
            name: "回顾核心概念".to_string(),
            duration_minutes: segment,
            activities: vec![
                format!("用思维导图复盘「{}」相关定义", request.topic),
                "找出与薄弱点相关的两个例子".to_string(),
            ],
        },
        PracticePhase {
            name: "针对性练习".to_string(),
            duration_minutes: segment,
            activities: targeted,
        },
        PracticePhase {
            name: "迁移与反思".to_string(),
            // short sessions are dominated by the two minimum segments
            duration_minutes: (request.available_minutes - 2 * segment).max(0),
            activities: vec![
                "尝试一道综合拓展题，写出解题步骤".to_string(),
                "总结保留问题与改进策略".to_string(),
            ],
        },
    ];

    PracticePlanResponse {
        topic: request.topic.clone(),
        student_level: request.student_level.clone(),
        total_minutes: request.available_minutes,
        weak_points,
        phases,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(minutes: i64, weak_points: &[&str]) -> PracticePlanRequest {
        PracticePlanRequest {
            topic: "Lebesgue积分".to_string(),
            student_level: "中级".to_string(),
            weak_points: weak_points.iter().map(|s| s.to_string()).collect(),
            available_minutes: minutes,
        }
    }

    #[test]
    fn test_minutes_split_into_three_phases() {
        let plan = build_practice_plan(&request(31, &[]));
        let durations: Vec<i64> = plan.phases.iter().map(|p| p.duration_minutes).collect();
        assert_eq!(durations, vec![10, 10, 11]);
        assert_eq!(plan.total_minutes, 31);
    }

    #[test]
    fn test_short_session_uses_minimum_segment() {
        let plan = build_practice_plan(&request(8, &[]));
        let durations: Vec<i64> = plan.phases.iter().map(|p| p.duration_minutes).collect();
        assert_eq!(durations, vec![5, 5, 0]);
    }

    #[test]
    fn test_weak_points_are_trimmed_and_prioritized() {
        let plan = build_practice_plan(&request(30, &[" 测度 ", "", "Fubini定理"]));
        assert_eq!(plan.weak_points, vec!["测度", "Fubini定理"]);
        assert_eq!(plan.phases[1].activities[0], "优先攻克：测度, Fubini定理");
        assert_eq!(plan.phases[1].activities.len(), 2);
    }

    #[test]
    fn test_validate_rejects_non_positive_minutes() {
        assert!(request(0, &[]).validate().is_err());
        assert!(request(1, &[]).validate().is_ok());
    }
}
