use thiserror::Error;

/// An immutable infrared spectrum as delivered by the parsing layer.
/// Wavelengths keep the order of the source file (FTIR exports usually
/// run high-to-low wavenumber); nothing in the engine assumes ascending order.
#[derive(Debug, Clone)]
pub struct Spectrum {
    pub id: String,
    pub wavelengths: Vec<f64>,
    pub absorbances: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("spectrum {id}: wavelength/absorbance length mismatch ({wavelengths} vs {absorbances})")]
    LengthMismatch {
        id: String,
        wavelengths: usize,
        absorbances: usize,
    },
    #[error("spectrum {id}: no data points")]
    Empty { id: String },
    #[error("spectrum {id}: non-finite {axis} value at index {index}")]
    NonFinite {
        id: String,
        axis: &'static str,
        index: usize,
    },
}

impl Spectrum {
    pub fn new(id: impl Into<String>, wavelengths: Vec<f64>, absorbances: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            wavelengths,
            absorbances,
        }
    }

    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }

    /// Checks the structural invariants once, up front. Malformed spectra are
    /// rejected rather than repaired; the parsing layer owns the fix.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.wavelengths.len() != self.absorbances.len() {
            return Err(ValidationError::LengthMismatch {
                id: self.id.clone(),
                wavelengths: self.wavelengths.len(),
                absorbances: self.absorbances.len(),
            });
        }
        if self.is_empty() {
            return Err(ValidationError::Empty {
                id: self.id.clone(),
            });
        }
        for (index, &w) in self.wavelengths.iter().enumerate() {
            if !w.is_finite() {
                return Err(ValidationError::NonFinite {
                    id: self.id.clone(),
                    axis: "wavelength",
                    index,
                });
            }
        }
        for (index, &a) in self.absorbances.iter().enumerate() {
            if !a.is_finite() {
                return Err(ValidationError::NonFinite {
                    id: self.id.clone(),
                    axis: "absorbance",
                    index,
                });
            }
        }
        Ok(())
    }
}
