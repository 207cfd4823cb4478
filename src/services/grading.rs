//! Keyword-coverage grading for subjective answers.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::round_to;

const CORRECT_SIMILARITY: f64 = 0.7;

#[derive(Debug, Clone, Deserialize)]
pub struct GradeAnswerRequest {
    pub question: String,
    pub correct_answer: String,
    pub student_answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeAnswerResponse {
    pub is_correct: bool,
    pub similarity: f64,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub feedback: String,
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .replace('，', " ")
        .replace('。', " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn feedback(student_answer: &str, similarity: f64) -> &'static str {
    if student_answer.trim().is_empty() {
        "系统未检测到作答，可提醒学生先尝试回答。"
    } else if similarity >= 0.9 {
        "作答内容非常完整，与标准答案高度一致。"
    } else if similarity >= CORRECT_SIMILARITY {
        "作答基本正确，可以补充缺失关键词以更全面。"
    } else if similarity >= 0.4 {
        "部分要点正确，建议强化缺失的概念。"
    } else {
        "与标准答案差距较大，可引导学生重新审题并列出要点。"
    }
}

pub fn score_answer(request: &GradeAnswerRequest) -> GradeAnswerResponse {
    let std_tokens = tokenize(&request.correct_answer);
    let stu_tokens: BTreeSet<String> = tokenize(&request.student_answer).into_iter().collect();
    let std_set: BTreeSet<&String> = std_tokens.iter().collect();

    let (matched, missing): (Vec<&String>, Vec<&String>) =
        std_set.into_iter().partition(|token| stu_tokens.contains(*token));

    // Duplicated reference tokens still count in the denominator.
    let coverage = matched.len() as f64 / std_tokens.len().max(1) as f64;
    let similarity = round_to(coverage, 3);

    GradeAnswerResponse {
        is_correct: similarity >= CORRECT_SIMILARITY,
        similarity,
        matched_keywords: matched.into_iter().cloned().collect(),
        missing_keywords: missing.into_iter().cloned().collect(),
        feedback: feedback(&request.student_answer, similarity).to_string(),
    }
}
