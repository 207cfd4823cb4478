pub mod affective_state;
pub mod cdm;
pub mod cognitive_diagnosis;
pub mod grading;
pub mod knowledge_tracing;
pub mod kt;
pub mod mastery_store;
pub mod practice;
pub mod reflection;
pub mod sentiment;

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
