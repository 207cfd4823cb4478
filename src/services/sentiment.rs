//! Keyword sentiment placeholders: sentence label, per-aspect label, intensity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::round_to;

pub const POSITIVE_WORDS: [&str; 7] = ["好", "满意", "喜欢", "清晰", "有趣", "赞", "棒"];
pub const NEGATIVE_WORDS: [&str; 7] = ["差", "糟", "难", "晦涩", "失望", "生气", "不满"];

pub const NEGATIVE: &str = "负面";
pub const NEUTRAL: &str = "中性";
pub const POSITIVE: &str = "正面";

#[derive(Debug, Clone, Deserialize)]
pub struct SentimentRequest {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentResponse {
    pub probabilities: BTreeMap<String, f64>,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AspectSentimentRequest {
    pub text: String,
    pub aspects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AspectSentimentResponse {
    pub aspect_results: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IntensityRequest {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntensityResponse {
    pub score: f64,
}

fn hits(text: &str, words: &[&str]) -> usize {
    words.iter().filter(|word| text.contains(*word)).count()
}

/// Category probabilities in negative, neutral, positive order.
fn simple_score(text: &str) -> [(&'static str, f64); 3] {
    let pos_hits = hits(text, &POSITIVE_WORDS);
    let neg_hits = hits(text, &NEGATIVE_WORDS);
    let total = pos_hits + neg_hits;
    if total == 0 {
        return [(NEGATIVE, 0.2), (NEUTRAL, 0.6), (POSITIVE, 0.2)];
    }

    let pos_prob = pos_hits as f64 / total as f64;
    let neg_prob = neg_hits as f64 / total as f64;
    [
        (NEGATIVE, round_to(0.1 + 0.8 * neg_prob, 3)),
        (NEUTRAL, 0.1),
        (POSITIVE, round_to(0.1 + 0.8 * pos_prob, 3)),
    ]
}

/// Highest probability wins; ties go to the earlier category.
fn top_label(scores: &[(&'static str, f64); 3]) -> &'static str {
    let mut best = scores[0];
    for candidate in &scores[1..] {
        if candidate.1 > best.1 {
            best = *candidate;
        }
    }
    best.0
}

pub fn run_inference_sentiment(text: &str) -> SentimentResponse {
    let scores = simple_score(text);
    SentimentResponse {
        label: top_label(&scores).to_string(),
        probabilities: scores
            .iter()
            .map(|(label, prob)| (label.to_string(), *prob))
            .collect(),
    }
}

/// Every aspect inherits the sentence-level label.
pub fn run_inference_aspect_sentiment(text: &str, aspects: &[String]) -> AspectSentimentResponse {
    let label = top_label(&simple_score(text));
    AspectSentimentResponse {
        aspect_results: aspects
            .iter()
            .map(|aspect| (aspect.clone(), label.to_string()))
            .collect(),
    }
}

pub fn run_inference_intensity(text: &str) -> IntensityResponse {
    let raw = hits(text, &POSITIVE_WORDS) + hits(text, &NEGATIVE_WORDS);
    IntensityResponse {
        score: round_to((raw as f64 / 3.0).tanh(), 3),
    }
}
