use serde::Serialize;

use crate::model::method::ScoreMethod;
use crate::model::spectrum::{Spectrum, ValidationError};
use crate::model::zone::{Zone, weight_for};
use crate::pipeline::align::{MATCH_EPSILON, align, nearest_within};

/// Per-wavelength deviation array for heat-map visualization of one sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviationProfile {
    pub wavelengths: Vec<f64>,
    pub deviations: Vec<f64>,
    pub max_deviation: f64,
    pub avg_deviation: f64,
}

impl DeviationProfile {
    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }
}

/// Builds the deviation profile for the selected sample.
///
/// For the RMSE/Pearson/hybrid views the deviation is the magnitude of the
/// selected sample's own delta from baseline. The area view instead measures
/// deviation from the cross-sample mean delta at each wavelength. The two
/// formulas are deliberately kept separate per method; see DESIGN.md.
///
/// Unknown selected id, empty sample set, or zero baseline overlap yield an
/// empty profile. A malformed non-selected sample is dropped from the
/// cross-sample mean with a warning; a malformed baseline or selected sample
/// is an error.
pub fn build_profile(
    baseline: &Spectrum,
    samples: &[Spectrum],
    selected_id: &str,
    zones: &[Zone],
    method: ScoreMethod,
) -> Result<DeviationProfile, ValidationError> {
    baseline.validate()?;

    let Some(selected) = samples.iter().find(|s| s.id == selected_id) else {
        tracing::warn!("deviation profile: no sample with id {selected_id:?}");
        return Ok(DeviationProfile::default());
    };

    let selected_points = align(baseline, selected)?;
    if selected_points.is_empty() {
        return Ok(DeviationProfile::default());
    }

    let mut wavelengths = Vec::with_capacity(selected_points.len());
    let mut deviations = Vec::with_capacity(selected_points.len());

    if method == ScoreMethod::Area {
        let aligned_sets = align_all(baseline, samples);
        for point in &selected_points {
            let mean = cross_sample_mean(&aligned_sets, point.wavelength).unwrap_or(point.delta);
            wavelengths.push(point.wavelength);
            deviations.push((point.delta - mean).abs() * weight_for(point.wavelength, zones));
        }
    } else {
        for point in &selected_points {
            wavelengths.push(point.wavelength);
            deviations.push(point.delta.abs() * weight_for(point.wavelength, zones));
        }
    }

    let max_deviation = deviations.iter().cloned().fold(0.0, f64::max);
    let avg_deviation = if deviations.is_empty() {
        0.0
    } else {
        deviations.iter().sum::<f64>() / deviations.len() as f64
    };

    Ok(DeviationProfile {
        wavelengths,
        deviations,
        max_deviation,
        avg_deviation,
    })
}

/// Each sample's aligned deltas as an ascending-wavelength pair of parallel
/// vectors, ready for binary search.
fn align_all(baseline: &Spectrum, samples: &[Spectrum]) -> Vec<(Vec<f64>, Vec<f64>)> {
    let mut sets = Vec::with_capacity(samples.len());
    for sample in samples {
        match align(baseline, sample) {
            Ok(points) if !points.is_empty() => {
                let mut order: Vec<usize> = (0..points.len()).collect();
                order.sort_by(|&a, &b| points[a].wavelength.total_cmp(&points[b].wavelength));
                let ws = order.iter().map(|&i| points[i].wavelength).collect();
                let ds = order.iter().map(|&i| points[i].delta).collect();
                sets.push((ws, ds));
            }
            Ok(_) => {}
            Err(err) => tracing::warn!("deviation profile: skipping sample: {err}"),
        }
    }
    sets
}

/// Mean delta at one wavelength across every sample that has an aligned
/// point within tolerance of it.
fn cross_sample_mean(aligned_sets: &[(Vec<f64>, Vec<f64>)], wavelength: f64) -> Option<f64> {
    let mut sum = 0.0;
    let mut n = 0usize;
    for (ws, ds) in aligned_sets {
        if let Some(i) = nearest_within(ws, wavelength, MATCH_EPSILON) {
            sum += ds[i];
            n += 1;
        }
    }
    (n > 0).then(|| sum / n as f64)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/profile.rs"]
mod tests;
