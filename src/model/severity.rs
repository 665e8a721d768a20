use serde::Serialize;

/// Coarse health tier derived from a score, never stored independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Good,
    Warning,
    Critical,
}

impl SeverityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityTier::Good => "good",
            SeverityTier::Warning => "warning",
            SeverityTier::Critical => "critical",
        }
    }
}
