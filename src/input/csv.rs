use std::fs::File;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;

use crate::input::InputError;
use crate::model::spectrum::Spectrum;

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn Read>, InputError> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(GzDecoder::new(file)))
    } else {
        Ok(Box::new(file))
    }
}

/// Reads a spectrum from a two-column CSV: wavenumber, absorbance.
///
/// Instrument exports open with a title line and a header line before the
/// data, so rows whose first two fields do not both parse as numbers are
/// skipped rather than rejected. A file with no numeric rows at all is an
/// error. Note that "NaN" parses as a float here; the spectrum invariant
/// check after loading is what rejects it.
pub fn parse_spectrum_csv(path: &Path, id: &str) -> Result<Spectrum, InputError> {
    let reader = open_maybe_gz(path)?;
    let mut rdr = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut wavelengths = Vec::new();
    let mut absorbances = Vec::new();
    let mut skipped_rows = 0usize;

    for (row, record) in rdr.records().enumerate() {
        let record = record
            .map_err(|e| InputError::Parse(format!("{}: row {}: {e}", path.display(), row + 1)))?;
        let (Some(x), Some(y)) = (record.get(0), record.get(1)) else {
            skipped_rows += 1;
            continue;
        };
        match (x.trim().parse::<f64>(), y.trim().parse::<f64>()) {
            (Ok(w), Ok(a)) => {
                wavelengths.push(w);
                absorbances.push(a);
            }
            _ => skipped_rows += 1,
        }
    }

    if wavelengths.is_empty() {
        return Err(InputError::Parse(format!(
            "{}: no numeric data rows",
            path.display()
        )));
    }
    if skipped_rows > 2 {
        tracing::debug!(
            "{}: skipped {} non-numeric rows",
            path.display(),
            skipped_rows
        );
    }

    Ok(Spectrum::new(id, wavelengths, absorbances))
}
