use serde::Serialize;

/// Per-sample quality flags raised while scoring. Diagnostics only: a flag
/// never changes a score, it records which fallback or coverage condition
/// fired on the way to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    InsufficientOverlap,
    PartialOverlap,
    ZeroVariance,
    ZeroWeight,
    UnweightedRegion,
}

pub fn flag_order() -> &'static [Flag] {
    &[
        Flag::InsufficientOverlap,
        Flag::PartialOverlap,
        Flag::ZeroVariance,
        Flag::ZeroWeight,
        Flag::UnweightedRegion,
    ]
}
