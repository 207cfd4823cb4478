use serde::Serialize;

/// Lower bound (inclusive) of the stable tier.
pub const STABLE_THRESHOLD: f64 = 0.85;
/// Lower bound (inclusive) of the developing tier.
pub const DEVELOPING_THRESHOLD: f64 = 0.65;

/// Coarse mastery band. Variant order is the ranking order: `HighRisk > Developing > Stable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Stable,
    Developing,
    HighRisk,
}

impl RiskTier {
    /// 数值越大表示越优先推荐
    pub fn priority_rank(self) -> u8 {
        match self {
            RiskTier::HighRisk => 3,
            RiskTier::Developing => 2,
            RiskTier::Stable => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Stable => "稳定掌握",
            RiskTier::Developing => "发展中",
            RiskTier::HighRisk => "高风险",
        }
    }
}

/// Maps a mastery score onto its tier. Each tier includes its lower bound, and
/// anything that is not `>= DEVELOPING_THRESHOLD` (NaN included) is high risk.
pub fn classify(score: f64) -> RiskTier {
    if score >= STABLE_THRESHOLD {
        RiskTier::Stable
    } else if score >= DEVELOPING_THRESHOLD {
        RiskTier::Developing
    } else {
        RiskTier::HighRisk
    }
}

pub fn priority_rank(tier: RiskTier) -> u8 {
    tier.priority_rank()
}
