use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;

pub mod json;
pub mod text;

use crate::model::flags::Flag;
use crate::model::method::{PearsonMapping, ScoreMethod};
use crate::model::severity::SeverityTier;
use crate::model::zone::Zone;
use crate::pipeline::classify::{SeverityCounts, tally};
use crate::pipeline::profile::DeviationProfile;
use crate::pipeline::stats::ComparisonStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportMode {
    Json,
    Text,
    Both,
}

/// One sample's report row. `score` is None for files that failed to load;
/// `error` says why.
#[derive(Debug, Clone)]
pub struct SampleRow {
    pub sample_id: String,
    pub score: Option<f64>,
    pub severity: Option<SeverityTier>,
    pub flags: Vec<Flag>,
    pub stats: Option<ComparisonStats>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SelectedProfile {
    pub sample_id: String,
    pub profile: DeviationProfile,
}

/// Everything the renderers need, assembled once by the caller.
#[derive(Debug, Clone)]
pub struct SummaryData {
    pub tool_name: String,
    pub tool_version: String,
    pub method: ScoreMethod,
    pub pearson_mapping: PearsonMapping,
    pub match_epsilon: f64,
    pub baseline_id: String,
    pub zones: Vec<Zone>,
    pub samples: Vec<SampleRow>,
    pub selected: Option<SelectedProfile>,
}

impl SummaryData {
    pub fn scores(&self) -> Vec<f64> {
        self.samples.iter().filter_map(|row| row.score).collect()
    }

    pub fn severity_counts(&self) -> SeverityCounts {
        let tiers: Vec<SeverityTier> =
            self.samples.iter().filter_map(|row| row.severity).collect();
        tally(&tiers)
    }

    pub fn skipped_count(&self) -> usize {
        self.samples.iter().filter(|row| row.error.is_some()).count()
    }
}

pub fn write_reports(data: &SummaryData, out_dir: &Path, mode: ReportMode) -> std::io::Result<()> {
    fs::create_dir_all(out_dir)?;
    if matches!(mode, ReportMode::Json | ReportMode::Both) {
        let path = out_dir.join("report.json");
        let rendered = json::render_summary_json(data).map_err(std::io::Error::other)?;
        let mut w = BufWriter::new(File::create(&path)?);
        w.write_all(rendered.as_bytes())?;
        w.write_all(b"\n")?;
        tracing::info!("wrote {}", path.display());
    }
    if matches!(mode, ReportMode::Text | ReportMode::Both) {
        let path = out_dir.join("report.txt");
        let mut w = BufWriter::new(File::create(&path)?);
        w.write_all(text::render_report_text(data).as_bytes())?;
        tracing::info!("wrote {}", path.display());
    }
    Ok(())
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted[sorted.len() / 2]
}

pub fn min_max(values: &[f64]) -> (f64, f64) {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if values.is_empty() { (0.0, 0.0) } else { (min, max) }
}
