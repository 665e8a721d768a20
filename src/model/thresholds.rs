/// Band edges and decay constant for the shared piecewise error-to-score
/// mapping. `t1`/`t2`/`t3` bound the [90,100] / [70,90) / [40,70) bands;
/// past `t3` the score decays exponentially inside [0,40) with constant
/// `decay`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthBands {
    pub t1: f64,
    pub t2: f64,
    pub t3: f64,
    pub decay: f64,
}

impl HealthBands {
    /// Bands for weighted-RMSE error, in absorbance units.
    pub fn rmse_v1() -> Self {
        Self {
            t1: 0.10,
            t2: 0.25,
            t3: 0.50,
            decay: 0.30,
        }
    }

    /// Bands for integrated |delta| area, in absorbance x wavenumber units.
    pub fn area_v1() -> Self {
        Self {
            t1: 50.0,
            t2: 200.0,
            t3: 500.0,
            decay: 300.0,
        }
    }
}

/// Fallback score when a comparison is valid but carries too little signal
/// to grade (under MIN_ALIGNED_POINTS overlap, or zero total weight).
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Minimum aligned-point count for any score to be meaningful.
pub const MIN_ALIGNED_POINTS: usize = 2;

/// Hybrid-method correlation penalty knots. Below STRONG_KNEE the penalty
/// ramps linearly toward STRONG_SPAN at r = 0; between the knots it ramps
/// toward MILD_SPAN. The jump at r = STRONG_KNEE (near 0 from below, 7.5 at
/// the knot) matches the observed behavior of the source system and is kept
/// as is.
pub const PENALTY_STRONG_KNEE: f64 = 0.90;
pub const PENALTY_STRONG_SPAN: f64 = 15.0;
pub const PENALTY_MILD_KNEE: f64 = 0.95;
pub const PENALTY_MILD_SPAN: f64 = 7.5;
