use crate::model::thresholds::HealthBands;

/// Maps a non-negative error metric into a bounded 0-100 health score with
/// four bands: [90,100] below t1, [70,90) up to t2, [40,70) up to t3, and an
/// exponential tail inside [0,40) past t3. The same shape serves both the
/// RMSE and area methods; only the band profile differs.
pub fn health_map(x: f64, bands: &HealthBands) -> f64 {
    if x <= bands.t1 {
        90.0 + 10.0 * (1.0 - x / bands.t1)
    } else if x <= bands.t2 {
        70.0 + 20.0 * (1.0 - (x - bands.t1) / (bands.t2 - bands.t1))
    } else if x <= bands.t3 {
        40.0 + 30.0 * (1.0 - (x - bands.t2) / (bands.t3 - bands.t2))
    } else {
        40.0 * (-(x - bands.t3) / bands.decay).exp()
    }
}
