use crate::model::flags::{Flag, flag_order};
use crate::model::method::{PearsonMapping, ScoreMethod};
use crate::model::spectrum::{Spectrum, ValidationError};
use crate::model::thresholds::{
    HealthBands, MIN_ALIGNED_POINTS, NEUTRAL_SCORE, PENALTY_MILD_KNEE, PENALTY_MILD_SPAN,
    PENALTY_STRONG_KNEE, PENALTY_STRONG_SPAN,
};
use crate::model::zone::{Zone, weight_for, zone_index_for};
use crate::pipeline::align::{AlignedPoint, align};
use crate::pipeline::health_map::health_map;
use crate::pipeline::stats::{weighted_abs_area, weighted_pearson, weighted_rmse};

#[derive(Debug, Clone)]
pub struct ScoreResult {
    pub sample_id: String,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct ScoreOutcome {
    pub score: f64,
    pub flags: Vec<Flag>,
}

/// One implementation per scoring method, all over the same aligned-point
/// view. Flags raised here record fallbacks, never change the score path
/// another scorer would take.
pub trait Scorer {
    fn score(&self, points: &[AlignedPoint], weights: &[f64], flags: &mut Vec<Flag>) -> f64;
}

pub struct RmseScorer {
    pub bands: HealthBands,
}

pub struct PearsonScorer {
    pub mapping: PearsonMapping,
}

pub struct AreaScorer {
    pub bands: HealthBands,
}

pub struct HybridScorer {
    pub bands: HealthBands,
}

impl Scorer for RmseScorer {
    fn score(&self, points: &[AlignedPoint], weights: &[f64], flags: &mut Vec<Flag>) -> f64 {
        match weighted_rmse(points, weights) {
            Some(x) => health_map(x, &self.bands),
            None => {
                flags.push(Flag::ZeroWeight);
                NEUTRAL_SCORE
            }
        }
    }
}

impl Scorer for PearsonScorer {
    fn score(&self, points: &[AlignedPoint], weights: &[f64], flags: &mut Vec<Flag>) -> f64 {
        let Some(p) = weighted_pearson(points, weights) else {
            flags.push(Flag::ZeroWeight);
            return NEUTRAL_SCORE;
        };
        if p.degenerate {
            flags.push(Flag::ZeroVariance);
        }
        match self.mapping {
            PearsonMapping::Shifted => ((p.r + 1.0) / 2.0 * 100.0).clamp(0.0, 100.0),
            PearsonMapping::Direct => (p.r * 100.0).clamp(0.0, 100.0),
        }
    }
}

impl Scorer for AreaScorer {
    fn score(&self, points: &[AlignedPoint], weights: &[f64], flags: &mut Vec<Flag>) -> f64 {
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            flags.push(Flag::ZeroWeight);
            return NEUTRAL_SCORE;
        }
        health_map(weighted_abs_area(points, weights), &self.bands)
    }
}

impl Scorer for HybridScorer {
    fn score(&self, points: &[AlignedPoint], weights: &[f64], flags: &mut Vec<Flag>) -> f64 {
        let Some(x) = weighted_rmse(points, weights) else {
            flags.push(Flag::ZeroWeight);
            return NEUTRAL_SCORE;
        };
        let base = health_map(x, &self.bands);
        let r = match weighted_pearson(points, weights) {
            Some(p) => {
                if p.degenerate {
                    flags.push(Flag::ZeroVariance);
                }
                p.r
            }
            None => 0.0,
        };
        (base - correlation_penalty(r)).clamp(0.0, 100.0)
    }
}

/// Correlation penalty for the hybrid method. The two linear ramps do not
/// meet at the strong knot; that step matches the source system and stays.
pub fn correlation_penalty(r: f64) -> f64 {
    if r < PENALTY_STRONG_KNEE {
        PENALTY_STRONG_SPAN * (PENALTY_STRONG_KNEE - r) / PENALTY_STRONG_KNEE
    } else if r < PENALTY_MILD_KNEE {
        PENALTY_MILD_SPAN * (PENALTY_MILD_KNEE - r) / (PENALTY_MILD_KNEE - PENALTY_STRONG_KNEE)
    } else {
        0.0
    }
}

pub fn scorer_for(method: ScoreMethod, mapping: PearsonMapping) -> Box<dyn Scorer> {
    match method {
        ScoreMethod::Rmse => Box::new(RmseScorer {
            bands: HealthBands::rmse_v1(),
        }),
        ScoreMethod::Pearson => Box::new(PearsonScorer { mapping }),
        ScoreMethod::Area => Box::new(AreaScorer {
            bands: HealthBands::area_v1(),
        }),
        ScoreMethod::Hybrid => Box::new(HybridScorer {
            bands: HealthBands::rmse_v1(),
        }),
    }
}

/// Scores one sample against the baseline. Pure and deterministic: repeated
/// calls with the same inputs produce bit-identical scores.
pub fn score(
    baseline: &Spectrum,
    sample: &Spectrum,
    zones: &[Zone],
    method: ScoreMethod,
    mapping: PearsonMapping,
) -> Result<f64, ValidationError> {
    Ok(score_outcome(baseline, sample, zones, method, mapping)?.score)
}

/// Scores one sample and reports the quality flags raised along the way.
pub fn score_outcome(
    baseline: &Spectrum,
    sample: &Spectrum,
    zones: &[Zone],
    method: ScoreMethod,
    mapping: PearsonMapping,
) -> Result<ScoreOutcome, ValidationError> {
    let points = align(baseline, sample)?;
    Ok(score_aligned(&points, sample.len(), zones, method, mapping))
}

/// Scoring over an already-aligned point set. `sample_points` is the
/// original sample size, used only for overlap-coverage flagging.
pub fn score_aligned(
    points: &[AlignedPoint],
    sample_points: usize,
    zones: &[Zone],
    method: ScoreMethod,
    mapping: PearsonMapping,
) -> ScoreOutcome {
    let mut flags = Vec::new();

    if points.len() < MIN_ALIGNED_POINTS {
        flags.push(Flag::InsufficientOverlap);
        return ScoreOutcome {
            score: NEUTRAL_SCORE,
            flags,
        };
    }
    if points.len() * 2 < sample_points {
        flags.push(Flag::PartialOverlap);
    }
    if !zones.is_empty() {
        let uncovered = points
            .iter()
            .filter(|p| zone_index_for(p.wavelength, zones).is_none())
            .count();
        if uncovered * 4 >= points.len() {
            flags.push(Flag::UnweightedRegion);
        }
    }

    let weights: Vec<f64> = points.iter().map(|p| weight_for(p.wavelength, zones)).collect();
    let score = scorer_for(method, mapping).score(points, &weights, &mut flags);

    ScoreOutcome {
        score,
        flags: in_stable_order(&flags),
    }
}

/// Batch scoring, one result per scorable sample. A malformed sample is
/// logged and skipped; it never aborts the rest of the batch. A malformed
/// baseline fails the whole call.
pub fn compute_scores(
    baseline: &Spectrum,
    samples: &[Spectrum],
    zones: &[Zone],
    method: ScoreMethod,
    mapping: PearsonMapping,
) -> Result<Vec<ScoreResult>, ValidationError> {
    baseline.validate()?;
    let mut out = Vec::with_capacity(samples.len());
    for sample in samples {
        match score(baseline, sample, zones, method, mapping) {
            Ok(value) => out.push(ScoreResult {
                sample_id: sample.id.clone(),
                score: value,
            }),
            Err(err) => tracing::warn!("skipping sample in batch: {err}"),
        }
    }
    Ok(out)
}

fn in_stable_order(flags: &[Flag]) -> Vec<Flag> {
    let mut ordered = Vec::new();
    for flag in flag_order() {
        if flags.contains(flag) {
            ordered.push(*flag);
        }
    }
    ordered
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/score.rs"]
mod tests;
