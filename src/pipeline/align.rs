use crate::model::spectrum::{Spectrum, ValidationError};

/// Wavelength pairing tolerance, in the wavenumber units of the input.
/// Upstream parsing can introduce float noise between exports of the same
/// instrument grid; tolerant matching is the only pairing mechanism here.
pub const MATCH_EPSILON: f64 = 1e-3;

/// One baseline/sample pair at a matched wavelength. The raw absorbances are
/// kept alongside the delta because the correlation scorer works on raw
/// values, not differences.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedPoint {
    pub wavelength: f64,
    pub baseline: f64,
    pub sample: f64,
    pub delta: f64,
}

/// Pairs a sample against a baseline by wavelength. Each sample point is
/// matched to the nearest baseline wavelength within MATCH_EPSILON; sample
/// points with no match are dropped (best-overlap policy, not an error).
/// Output preserves the sample's point order. An empty result means
/// insufficient overlap and is left to the caller to resolve.
pub fn align(baseline: &Spectrum, sample: &Spectrum) -> Result<Vec<AlignedPoint>, ValidationError> {
    baseline.validate()?;
    sample.validate()?;

    // FTIR exports commonly run high-to-low wavenumber; sort an index view
    // once so each sample point is a binary search.
    let mut order: Vec<usize> = (0..baseline.len()).collect();
    order.sort_by(|&a, &b| baseline.wavelengths[a].total_cmp(&baseline.wavelengths[b]));
    let sorted: Vec<f64> = order.iter().map(|&i| baseline.wavelengths[i]).collect();

    let mut out = Vec::with_capacity(sample.len());
    for (i, &w) in sample.wavelengths.iter().enumerate() {
        if let Some(pos) = nearest_within(&sorted, w, MATCH_EPSILON) {
            let b = baseline.absorbances[order[pos]];
            let s = sample.absorbances[i];
            out.push(AlignedPoint {
                wavelength: w,
                baseline: b,
                sample: s,
                delta: s - b,
            });
        }
    }
    Ok(out)
}

/// Index of the entry in an ascending slice closest to `target`, if any lies
/// within `eps`. Ties go to the lower wavelength.
pub fn nearest_within(sorted: &[f64], target: f64, eps: f64) -> Option<usize> {
    if sorted.is_empty() {
        return None;
    }
    let pos = sorted.partition_point(|&w| w < target);
    let mut best: Option<usize> = None;
    let mut best_dist = f64::INFINITY;
    let candidates = [pos.checked_sub(1), (pos < sorted.len()).then_some(pos)];
    for idx in candidates.into_iter().flatten() {
        let dist = (sorted[idx] - target).abs();
        if dist <= eps && dist < best_dist {
            best = Some(idx);
            best_dist = dist;
        }
    }
    best
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/align.rs"]
mod tests;
