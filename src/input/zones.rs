use std::path::Path;

use crate::input::InputError;
use crate::model::zone::Zone;

/// Loads a zone configuration: a JSON array of zones whose file order is the
/// resolution order. Rejects inverted or non-finite bounds and negative
/// weights; overlap is allowed (first match wins downstream).
pub fn load_zones(path: &Path) -> Result<Vec<Zone>, InputError> {
    let text = std::fs::read_to_string(path)?;
    let zones: Vec<Zone> = serde_json::from_str(&text)
        .map_err(|e| InputError::Parse(format!("{}: {e}", path.display())))?;

    for (i, zone) in zones.iter().enumerate() {
        if !zone.min_wavelength.is_finite()
            || !zone.max_wavelength.is_finite()
            || !zone.weight_percent.is_finite()
        {
            return Err(InputError::InvalidInput(format!(
                "{}: zone {} ({}): non-finite field",
                path.display(),
                i,
                zone.key
            )));
        }
        if zone.min_wavelength >= zone.max_wavelength {
            return Err(InputError::InvalidInput(format!(
                "{}: zone {} ({}): min_wavelength {} must be below max_wavelength {}",
                path.display(),
                i,
                zone.key,
                zone.min_wavelength,
                zone.max_wavelength
            )));
        }
        if zone.weight_percent < 0.0 {
            return Err(InputError::InvalidInput(format!(
                "{}: zone {} ({}): negative weight_percent {}",
                path.display(),
                i,
                zone.key,
                zone.weight_percent
            )));
        }
    }

    tracing::debug!("loaded {} zones from {}", zones.len(), path.display());
    Ok(zones)
}
