//! Post-lesson reflection question generator.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    fn base_questions(self) -> [&'static str; 2] {
        match self {
            Difficulty::Easy => [
                "今天学到的最重要概念是什么？",
                "用自己的话复述一个课堂例子。",
            ],
            Difficulty::Medium => [
                "本课知识与之前内容有什么联系？",
                "如果向同学讲授这个内容，你会怎么安排步骤？",
            ],
            Difficulty::Hard => [
                "当遇到相关题目时，你最容易出错的环节是什么？如何避免？",
                "设计一道新题检验该知识点，并写出答案。",
            ],
        }
    }
}

impl FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ValidationError::InvalidChoice {
                field: "difficulty",
                allowed: "easy/medium/hard",
            }),
        }
    }
}

fn default_difficulty() -> String {
    "medium".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReflectionRequest {
    pub lesson_title: String,
    #[serde(default)]
    pub skills_focus: Option<Vec<String>>,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReflectionResponse {
    pub lesson_title: String,
    pub difficulty: Difficulty,
    pub questions: Vec<String>,
}

pub fn generate_reflections(request: &ReflectionRequest) -> Result<ReflectionResponse, ValidationError> {
    let difficulty: Difficulty = request.difficulty.parse()?;

    let mut questions: Vec<String> = difficulty
        .base_questions()
        .iter()
        .map(|q| q.to_string())
        .collect();
    if let Some(skills) = &request.skills_focus {
        questions.extend(
            skills
                .iter()
                .map(|skill| format!("在本课中，你如何体现「{skill}」这一能力？")),
        );
    }

    Ok(ReflectionResponse {
        lesson_title: request.lesson_title.clone(),
        difficulty,
        questions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(difficulty: &str, skills: Option<Vec<&str>>) -> ReflectionRequest {
        ReflectionRequest {
            lesson_title: "测度论".to_string(),
            skills_focus: skills.map(|s| s.into_iter().map(String::from).collect()),
            difficulty: difficulty.to_string(),
        }
    }

    #[test]
    fn test_difficulty_is_case_insensitive() {
        let response = generate_reflections(&request("HARD", None)).unwrap();
        assert_eq!(response.difficulty, Difficulty::Hard);
        assert_eq!(response.questions.len(), 2);
    }

    #[test]
    fn test_skill_questions_are_appended() {
        let response = generate_reflections(&request("easy", Some(vec!["建模", "推理"]))).unwrap();
        assert_eq!(response.questions.len(), 4);
        assert_eq!(response.questions[3], "在本课中，你如何体现「推理」这一能力？");
    }

    #[test]
    fn test_unknown_difficulty_is_rejected() {
        assert!(matches!(
            generate_reflections(&request("extreme", None)),
            Err(ValidationError::InvalidChoice { field: "difficulty", .. })
        ));
    }
}
