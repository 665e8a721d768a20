use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod csv;
pub mod zones;

use crate::model::spectrum::Spectrum;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// A sample file that failed to load; the batch carries on without it and
/// the report shows why.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub id: String,
    pub path: PathBuf,
    pub error: String,
}

/// Loads one spectrum and checks its invariants eagerly, so a bad file is
/// rejected here instead of surfacing later inside the engine.
pub fn load_spectrum(path: &Path) -> Result<Spectrum, InputError> {
    let id = spectrum_id_from_path(path);
    let spectrum = csv::parse_spectrum_csv(path, &id)?;
    spectrum
        .validate()
        .map_err(|e| InputError::InvalidInput(format!("{}: {e}", path.display())))?;
    Ok(spectrum)
}

/// Loads sample spectra from explicit paths plus an optional directory scan.
/// Directory entries are taken in name order so runs are deterministic.
/// Unloadable files are recorded and skipped, never fatal.
pub fn load_samples(
    paths: &[PathBuf],
    dir: Option<&Path>,
) -> Result<(Vec<Spectrum>, Vec<SkippedFile>), InputError> {
    let mut all_paths: Vec<PathBuf> = paths.to_vec();
    if let Some(dir) = dir {
        match discover_sample_files(dir) {
            Ok(found) => all_paths.extend(found),
            // An empty directory is only fatal when it was the sole source.
            Err(err @ InputError::MissingInput(_)) if !paths.is_empty() => {
                tracing::warn!("{err}");
            }
            Err(err) => return Err(err),
        }
    }
    if all_paths.is_empty() {
        return Err(InputError::MissingInput(
            "no sample files given (use --sample and/or --samples-dir)".to_string(),
        ));
    }

    let mut samples = Vec::with_capacity(all_paths.len());
    let mut skipped = Vec::new();
    for path in &all_paths {
        match load_spectrum(path) {
            Ok(spectrum) => samples.push(spectrum),
            Err(err) => {
                tracing::warn!("skipping sample file {}: {err}", path.display());
                skipped.push(SkippedFile {
                    id: spectrum_id_from_path(path),
                    path: path.clone(),
                    error: err.to_string(),
                });
            }
        }
    }
    Ok((samples, skipped))
}

/// CSV files (optionally gzipped) in one directory, sorted by name.
pub fn discover_sample_files(dir: &Path) -> Result<Vec<PathBuf>, InputError> {
    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.ends_with(".csv") || name.ends_with(".csv.gz") {
            found.push(path);
        }
    }
    if found.is_empty() {
        return Err(InputError::MissingInput(format!(
            "no .csv or .csv.gz files in {}",
            dir.display()
        )));
    }
    found.sort();
    Ok(found)
}

/// Sample id from the file name: the stem with .csv/.gz suffixes stripped.
pub fn spectrum_id_from_path(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    let name = name.strip_suffix(".csv").unwrap_or(name);
    name.to_string()
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
