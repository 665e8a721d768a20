use serde::Serialize;

use crate::model::spectrum::Spectrum;
use crate::pipeline::align::AlignedPoint;

/// Cap on points fed to the pairwise statistics; larger spectra are strided
/// down first.
pub const MAX_STAT_POINTS: usize = 5000;

/// Tighter cap for the quadratic Frechet recurrence.
pub const MAX_FRECHET_POINTS: usize = 500;

#[derive(Debug, Clone, Copy)]
pub struct WeightedPearson {
    pub r: f64,
    /// True when a weighted standard deviation was zero and r = 0 was
    /// substituted.
    pub degenerate: bool,
}

/// Weighted RMSE over aligned deltas: sqrt(sum(w * d^2) / sum(w)).
/// None when the total weight is not positive.
pub fn weighted_rmse(points: &[AlignedPoint], weights: &[f64]) -> Option<f64> {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return None;
    }
    let sum_sq: f64 = points
        .iter()
        .zip(weights)
        .map(|(p, &w)| w * p.delta * p.delta)
        .sum();
    Some((sum_sq / total).max(0.0).sqrt())
}

/// Weighted Pearson correlation between the raw baseline and sample
/// absorbances at aligned wavelengths. Uses weighted means, covariance, and
/// standard deviations; r is clamped to [-1, 1] against float noise. None
/// when the total weight is not positive.
pub fn weighted_pearson(points: &[AlignedPoint], weights: &[f64]) -> Option<WeightedPearson> {
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return None;
    }

    let mut mean_b = 0.0;
    let mut mean_s = 0.0;
    for (p, &w) in points.iter().zip(weights) {
        mean_b += w * p.baseline;
        mean_s += w * p.sample;
    }
    mean_b /= total;
    mean_s /= total;

    let mut cov = 0.0;
    let mut var_b = 0.0;
    let mut var_s = 0.0;
    for (p, &w) in points.iter().zip(weights) {
        let db = p.baseline - mean_b;
        let ds = p.sample - mean_s;
        cov += w * db * ds;
        var_b += w * db * db;
        var_s += w * ds * ds;
    }

    let std_b = (var_b / total).max(0.0).sqrt();
    let std_s = (var_s / total).max(0.0).sqrt();
    if std_b == 0.0 || std_s == 0.0 {
        return Some(WeightedPearson {
            r: 0.0,
            degenerate: true,
        });
    }

    let r = (cov / total / (std_b * std_s)).clamp(-1.0, 1.0);
    Some(WeightedPearson {
        r,
        degenerate: false,
    })
}

/// Weighted trapezoidal integral of |delta| over wavelength: for each
/// adjacent pair, avg(w) * |dw| * avg(|delta|). The |dw| keeps descending
/// wavenumber order from flipping the sign. Zero for fewer than two points.
pub fn weighted_abs_area(points: &[AlignedPoint], weights: &[f64]) -> f64 {
    let mut area = 0.0;
    for i in 0..points.len().saturating_sub(1) {
        let w = 0.5 * (weights[i] + weights[i + 1]);
        let dw = (points[i + 1].wavelength - points[i].wavelength).abs();
        let d = 0.5 * (points[i].delta.abs() + points[i + 1].delta.abs());
        area += w * dw * d;
    }
    area
}

// ---------------------------------------------------------------------
// Per-sample comparison statistics for the report.
// ---------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct SpectrumStats {
    pub points: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub wavelength_min: f64,
    pub wavelength_max: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiffStats {
    pub mean_diff: f64,
    pub std_diff: f64,
    pub range_diff: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimilarityStats {
    pub sse: f64,
    pub normalized_sse: f64,
    pub rmse: f64,
    pub frechet_distance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonStats {
    pub baseline: SpectrumStats,
    pub sample: SpectrumStats,
    pub differences: DiffStats,
    pub similarity: SimilarityStats,
}

/// Summary, difference, and curve-similarity statistics for one
/// baseline/sample pair. Assumes both spectra already passed validation;
/// degenerate sizes (single-point spectra) produce zeros, not NaN.
pub fn compare_stats(baseline: &Spectrum, sample: &Spectrum) -> ComparisonStats {
    let b = spectrum_stats(baseline);
    let s = spectrum_stats(sample);

    let differences = DiffStats {
        mean_diff: s.mean - b.mean,
        std_diff: s.std - b.std,
        range_diff: (s.max - s.min) - (b.max - b.min),
    };

    let base_curve = strided_curve(baseline, MAX_STAT_POINTS);
    let samp_curve = strided_curve(sample, MAX_STAT_POINTS);
    let similarity = similarity_stats(&base_curve, &samp_curve);

    ComparisonStats {
        baseline: b,
        sample: s,
        differences,
        similarity,
    }
}

pub fn spectrum_stats(spectrum: &Spectrum) -> SpectrumStats {
    let ys = &spectrum.absorbances;
    let n = ys.len();
    let mean = if n > 0 { ys.iter().sum::<f64>() / n as f64 } else { 0.0 };
    // n-1 denominator, matching the reference implementation's convention.
    let std = if n > 1 {
        let ss: f64 = ys.iter().map(|&y| (y - mean) * (y - mean)).sum();
        (ss / (n - 1) as f64).sqrt()
    } else {
        0.0
    };
    let min = ys.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let w_min = spectrum.wavelengths.iter().cloned().fold(f64::INFINITY, f64::min);
    let w_max = spectrum
        .wavelengths
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);
    SpectrumStats {
        points: n,
        mean,
        std,
        min,
        max,
        wavelength_min: w_min,
        wavelength_max: w_max,
    }
}

fn similarity_stats(baseline: &[(f64, f64)], sample: &[(f64, f64)]) -> SimilarityStats {
    // SSE of the baseline against the sample interpolated onto the baseline
    // wavelength grid.
    let mut sse = 0.0;
    for &(x, y) in baseline {
        let interp = interp_at(sample, x);
        sse += (y - interp) * (y - interp);
    }
    let n = baseline.len().max(1);
    let normalized_sse = sse / n as f64;
    let rmse = normalized_sse.sqrt();

    let frechet_distance = discrete_frechet(
        &stride(baseline, MAX_FRECHET_POINTS),
        &stride(sample, MAX_FRECHET_POINTS),
    );

    SimilarityStats {
        sse,
        normalized_sse,
        rmse,
        frechet_distance,
    }
}

/// Spectrum as an ascending-wavelength curve, strided down to at most
/// roughly `cap` points.
fn strided_curve(spectrum: &Spectrum, cap: usize) -> Vec<(f64, f64)> {
    let mut curve: Vec<(f64, f64)> = spectrum
        .wavelengths
        .iter()
        .cloned()
        .zip(spectrum.absorbances.iter().cloned())
        .collect();
    curve.sort_by(|a, b| a.0.total_cmp(&b.0));
    stride(&curve, cap)
}

fn stride(curve: &[(f64, f64)], cap: usize) -> Vec<(f64, f64)> {
    if curve.len() <= cap {
        return curve.to_vec();
    }
    let step = curve.len() / cap;
    curve.iter().step_by(step.max(1)).cloned().collect()
}

/// Linear interpolation over an ascending curve with edge clamping: targets
/// outside the curve's range take the first/last value.
pub fn interp_at(curve: &[(f64, f64)], x: f64) -> f64 {
    match curve {
        [] => 0.0,
        [only] => only.1,
        _ => {
            if x <= curve[0].0 {
                return curve[0].1;
            }
            if x >= curve[curve.len() - 1].0 {
                return curve[curve.len() - 1].1;
            }
            let hi = curve.partition_point(|&(cx, _)| cx < x);
            let (x0, y0) = curve[hi - 1];
            let (x1, y1) = curve[hi];
            if x1 == x0 {
                return y0;
            }
            y0 + (y1 - y0) * (x - x0) / (x1 - x0)
        }
    }
}

/// Discrete Frechet distance between two curves, the usual dynamic-program
/// over the pairwise point distances.
pub fn discrete_frechet(p: &[(f64, f64)], q: &[(f64, f64)]) -> f64 {
    let n = p.len();
    let m = q.len();
    if n == 0 || m == 0 {
        return 0.0;
    }

    let dist = |a: (f64, f64), b: (f64, f64)| -> f64 {
        let dx = a.0 - b.0;
        let dy = a.1 - b.1;
        (dx * dx + dy * dy).sqrt()
    };

    let mut ca = vec![0.0f64; n * m];
    ca[0] = dist(p[0], q[0]);
    for j in 1..m {
        ca[j] = ca[j - 1].max(dist(p[0], q[j]));
    }
    for i in 1..n {
        ca[i * m] = ca[(i - 1) * m].max(dist(p[i], q[0]));
    }
    for i in 1..n {
        for j in 1..m {
            let best = ca[(i - 1) * m + j]
                .min(ca[i * m + j - 1])
                .min(ca[(i - 1) * m + j - 1]);
            ca[i * m + j] = best.max(dist(p[i], q[j]));
        }
    }
    ca[n * m - 1]
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stats.rs"]
mod tests;
