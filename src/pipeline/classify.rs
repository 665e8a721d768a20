use serde::Serialize;

use crate::model::severity::SeverityTier;

/// Maps a 0-100 score to a severity tier. Boundary-inclusive upward: a
/// score of exactly 90 is good, exactly 70 is warning.
pub fn classify(score: f64) -> SeverityTier {
    if score >= 90.0 {
        SeverityTier::Good
    } else if score >= 70.0 {
        SeverityTier::Warning
    } else {
        SeverityTier::Critical
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub good: usize,
    pub warning: usize,
    pub critical: usize,
}

pub fn tally(tiers: &[SeverityTier]) -> SeverityCounts {
    let mut counts = SeverityCounts::default();
    for tier in tiers {
        match tier {
            SeverityTier::Good => counts.good += 1,
            SeverityTier::Warning => counts.warning += 1,
            SeverityTier::Critical => counts.critical += 1,
        }
    }
    counts
}
