use serde::Serialize;

use crate::model::flags::Flag;
use crate::model::severity::SeverityTier;
use crate::model::zone::Zone;
use crate::pipeline::classify::SeverityCounts;
use crate::pipeline::profile::DeviationProfile;
use crate::pipeline::stats::ComparisonStats;
use crate::report::{SummaryData, median, min_max, round2};

#[derive(Serialize)]
struct JsonReport<'a> {
    tool: ToolBlock<'a>,
    config: ConfigBlock<'a>,
    samples: Vec<SampleBlock<'a>>,
    aggregate: AggregateBlock,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_profile: Option<ProfileBlock<'a>>,
}

#[derive(Serialize)]
struct ToolBlock<'a> {
    name: &'a str,
    version: &'a str,
}

#[derive(Serialize)]
struct ConfigBlock<'a> {
    method: &'a str,
    pearson_mapping: &'a str,
    match_epsilon: f64,
    baseline_id: &'a str,
    zones: &'a [Zone],
}

#[derive(Serialize)]
struct SampleBlock<'a> {
    sample_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    severity: Option<SeverityTier>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    flags: Vec<Flag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<&'a ComparisonStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

#[derive(Serialize)]
struct AggregateBlock {
    n_samples: usize,
    n_skipped: usize,
    score_median: f64,
    score_min: f64,
    score_max: f64,
    severity_counts: SeverityCounts,
}

#[derive(Serialize)]
struct ProfileBlock<'a> {
    sample_id: &'a str,
    #[serde(flatten)]
    profile: &'a DeviationProfile,
}

pub fn render_summary_json(data: &SummaryData) -> serde_json::Result<String> {
    let samples: Vec<SampleBlock<'_>> = data
        .samples
        .iter()
        .map(|row| SampleBlock {
            sample_id: &row.sample_id,
            score: row.score.map(round2),
            severity: row.severity,
            flags: row.flags.clone(),
            stats: row.stats.as_ref(),
            error: row.error.as_deref(),
        })
        .collect();

    let scores = data.scores();
    let (score_min, score_max) = min_max(&scores);
    let aggregate = AggregateBlock {
        n_samples: scores.len(),
        n_skipped: data.skipped_count(),
        score_median: round2(median(&scores)),
        score_min: round2(score_min),
        score_max: round2(score_max),
        severity_counts: data.severity_counts(),
    };

    let report = JsonReport {
        tool: ToolBlock {
            name: &data.tool_name,
            version: &data.tool_version,
        },
        config: ConfigBlock {
            method: data.method.as_str(),
            pearson_mapping: data.pearson_mapping.as_str(),
            match_epsilon: data.match_epsilon,
            baseline_id: &data.baseline_id,
            zones: &data.zones,
        },
        samples,
        aggregate,
        selected_profile: data.selected.as_ref().map(|sel| ProfileBlock {
            sample_id: &sel.sample_id,
            profile: &sel.profile,
        }),
    };

    serde_json::to_string_pretty(&report)
}
