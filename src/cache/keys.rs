use std::time::Duration;

pub const MASTERY_TTL: Duration = Duration::from_secs(24 * 60 * 60);

pub fn mastery_key(student_id: &str) -> String {
    format!("mastery:{}", student_id)
}
