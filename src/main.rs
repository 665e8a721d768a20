mod cache;
mod input;
mod model;
mod pipeline;
mod report;
mod trace;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::cache::{ScoreCache, ScoreKey, zones_fingerprint};
use crate::input::{SkippedFile, load_samples, load_spectrum};
use crate::model::method::{PearsonMapping, ScoreMethod};
use crate::model::spectrum::Spectrum;
use crate::model::zone::Zone;
use crate::pipeline::classify::classify;
use crate::pipeline::profile::build_profile;
use crate::pipeline::score::score_outcome;
use crate::pipeline::stats::compare_stats;
use crate::report::{ReportMode, SampleRow, SelectedProfile, SummaryData, write_reports};

#[derive(Debug, Parser)]
#[command(
    name = "ftir-degradeqc",
    version,
    about = "FTIR degradation scoring and severity classification"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score sample spectra against a baseline and write reports.
    Run(RunArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Baseline spectrum CSV (optionally gzipped).
    #[arg(long)]
    baseline: PathBuf,

    /// Sample spectrum CSV; repeatable.
    #[arg(long = "sample")]
    samples: Vec<PathBuf>,

    /// Directory scanned for additional sample CSVs.
    #[arg(long)]
    samples_dir: Option<PathBuf>,

    /// Zone weighting configuration, a JSON array of zones.
    #[arg(long)]
    zones: Option<PathBuf>,

    /// Scoring method.
    #[arg(long, value_enum, default_value_t = ScoreMethod::Hybrid)]
    method: ScoreMethod,

    /// How a Pearson r becomes a score (pearson method only).
    #[arg(long, value_enum, default_value_t = PearsonMapping::Shifted)]
    pearson_mapping: PearsonMapping,

    /// Sample id for the deviation profile; defaults to the first sample.
    #[arg(long)]
    selected: Option<String>,

    /// Output directory for reports.
    #[arg(long)]
    out: PathBuf,

    /// Which reports to write.
    #[arg(long, value_enum, default_value_t = ReportMode::Both)]
    mode: ReportMode,
}

fn main() {
    trace::init();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let Command::Run(args) = cli.command;

    let baseline = load_spectrum(&args.baseline).map_err(|e| e.to_string())?;
    tracing::info!("baseline {}: {} points", baseline.id, baseline.len());

    let (samples, skipped) =
        load_samples(&args.samples, args.samples_dir.as_deref()).map_err(|e| e.to_string())?;
    if samples.is_empty() {
        return Err(format!(
            "no valid sample spectra ({} file(s) failed to load)",
            skipped.len()
        ));
    }
    tracing::info!(
        "loaded {} sample(s), skipped {}",
        samples.len(),
        skipped.len()
    );

    let zones: Vec<Zone> = match &args.zones {
        Some(path) => input::zones::load_zones(path).map_err(|e| e.to_string())?,
        None => Vec::new(),
    };

    let rows = score_all(
        &baseline,
        &samples,
        &skipped,
        &zones,
        args.method,
        args.pearson_mapping,
    );

    let selected_id = args
        .selected
        .clone()
        .or_else(|| samples.first().map(|s| s.id.clone()));
    let selected = match &selected_id {
        Some(id) => {
            let profile = build_profile(&baseline, &samples, id, &zones, args.method)
                .map_err(|e| e.to_string())?;
            Some(SelectedProfile {
                sample_id: id.clone(),
                profile,
            })
        }
        None => None,
    };

    let data = SummaryData {
        tool_name: "ftir-degradeqc".to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        method: args.method,
        pearson_mapping: args.pearson_mapping,
        match_epsilon: pipeline::align::MATCH_EPSILON,
        baseline_id: baseline.id.clone(),
        zones,
        samples: rows,
        selected,
    };

    write_reports(&data, &args.out, args.mode).map_err(|e| e.to_string())?;
    Ok(())
}

/// Scores every loaded sample through the memo cache and appends error rows
/// for files that never loaded. One bad sample never stops the batch.
fn score_all(
    baseline: &Spectrum,
    samples: &[Spectrum],
    skipped: &[SkippedFile],
    zones: &[Zone],
    method: ScoreMethod,
    mapping: PearsonMapping,
) -> Vec<SampleRow> {
    let mut cache = ScoreCache::new();
    let zones_fp = zones_fingerprint(zones);
    let mut rows = Vec::with_capacity(samples.len() + skipped.len());

    for sample in samples {
        let key = ScoreKey {
            baseline_id: baseline.id.clone(),
            sample_id: sample.id.clone(),
            zones_fingerprint: zones_fp,
            method,
            mapping,
        };
        let outcome = match cache.get(&key) {
            Some(hit) => hit,
            None => match score_outcome(baseline, sample, zones, method, mapping) {
                Ok(outcome) => {
                    cache.insert(key, outcome.clone());
                    outcome
                }
                Err(err) => {
                    tracing::warn!("scoring {} failed: {err}", sample.id);
                    rows.push(SampleRow {
                        sample_id: sample.id.clone(),
                        score: None,
                        severity: None,
                        flags: Vec::new(),
                        stats: None,
                        error: Some(err.to_string()),
                    });
                    continue;
                }
            },
        };

        rows.push(SampleRow {
            sample_id: sample.id.clone(),
            score: Some(outcome.score),
            severity: Some(classify(outcome.score)),
            flags: outcome.flags,
            stats: Some(compare_stats(baseline, sample)),
            error: None,
        });
    }

    for skip in skipped {
        rows.push(SampleRow {
            sample_id: skip.id.clone(),
            score: None,
            severity: None,
            flags: Vec::new(),
            stats: None,
            error: Some(skip.error.clone()),
        });
    }

    rows
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
