use serde::{Deserialize, Serialize};

/// A contiguous wavenumber interval with a relative importance weight.
/// Zones come from user configuration and are resolved in list order:
/// when zones overlap, the first match wins. That ordering sensitivity is
/// the documented contract, not an accident to normalize away.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub min_wavelength: f64,
    pub max_wavelength: f64,
    pub weight_percent: f64,
    pub label: String,
    pub key: String,
}

/// Index of the first zone covering `wavelength`, in list order. Bounds are
/// inclusive on both ends.
pub fn zone_index_for(wavelength: f64, zones: &[Zone]) -> Option<usize> {
    zones
        .iter()
        .position(|z| wavelength >= z.min_wavelength && wavelength <= z.max_wavelength)
}

/// First-match importance multiplier for one wavelength. An unconfigured
/// region gets full weight; zero weight only ever comes from an explicit
/// zone.
pub fn weight_for(wavelength: f64, zones: &[Zone]) -> f64 {
    match zone_index_for(wavelength, zones) {
        Some(i) => zones[i].weight_percent / 100.0,
        None => 1.0,
    }
}
