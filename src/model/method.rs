use clap::ValueEnum;
use serde::Serialize;

/// Scoring method selector. Dispatch is enum-driven end to end; there is no
/// string-keyed lookup anywhere in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMethod {
    Rmse,
    Pearson,
    Area,
    Hybrid,
}

impl ScoreMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreMethod::Rmse => "rmse",
            ScoreMethod::Pearson => "pearson",
            ScoreMethod::Area => "area",
            ScoreMethod::Hybrid => "hybrid",
        }
    }
}

/// How a weighted Pearson r becomes a 0-100 score. The source system carried
/// both mappings in different call sites; they disagree materially for
/// negative correlations, so both survive here as named variants instead of
/// being merged into one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PearsonMapping {
    /// clamp((r + 1) / 2 * 100): anticorrelation maps onto [0, 50).
    Shifted,
    /// clamp(r * 100): anything below r = 0 collapses to 0.
    Direct,
}

impl PearsonMapping {
    pub fn as_str(&self) -> &'static str {
        match self {
            PearsonMapping::Shifted => "shifted",
            PearsonMapping::Direct => "direct",
        }
    }
}
