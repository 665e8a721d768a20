use crate::pipeline::classify::SeverityCounts;
use crate::report::{SummaryData, median, min_max};

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("FTIR Degradation Report\n");
    out.push_str("=======================\n\n");

    out.push_str("1. Run configuration\n");
    out.push_str(&format!("Tool: {} {}\n", data.tool_name, data.tool_version));
    out.push_str(&format!("Method: {}\n", data.method.as_str()));
    out.push_str(&format!(
        "Pearson mapping: {}\n",
        data.pearson_mapping.as_str()
    ));
    out.push_str(&format!("Wavelength tolerance: {}\n", data.match_epsilon));
    out.push_str(&format!("Baseline: {}\n", data.baseline_id));
    if data.zones.is_empty() {
        out.push_str("Zones: none (uniform weight)\n\n");
    } else {
        out.push_str(&format!("Zones: {}\n", data.zones.len()));
        for zone in &data.zones {
            out.push_str(&format!(
                "  {} [{} - {}] weight {}%\n",
                zone.key, zone.min_wavelength, zone.max_wavelength, zone.weight_percent
            ));
        }
        out.push('\n');
    }

    out.push_str("2. Sample scores\n");
    for row in &data.samples {
        match (row.score, row.severity) {
            (Some(score), Some(severity)) => {
                out.push_str(&format!(
                    "{}: score={:.2} severity={}",
                    row.sample_id,
                    score,
                    severity.as_str()
                ));
                if !row.flags.is_empty() {
                    let names: Vec<&str> = row.flags.iter().map(flag_name).collect();
                    out.push_str(&format!(" flags={}", names.join(",")));
                }
                out.push('\n');
            }
            _ => {
                out.push_str(&format!(
                    "{}: SKIPPED ({})\n",
                    row.sample_id,
                    row.error.as_deref().unwrap_or("unknown error")
                ));
            }
        }
    }
    out.push('\n');

    out.push_str("3. Summary\n");
    let scores = data.scores();
    let counts = data.severity_counts();
    out.push_str(&format!(
        "Samples scored: {} (skipped: {})\n",
        scores.len(),
        data.skipped_count()
    ));
    if !scores.is_empty() {
        let (min, max) = min_max(&scores);
        out.push_str(&format!(
            "Score median: {:.2}, min: {:.2}, max: {:.2}\n",
            median(&scores),
            min,
            max
        ));
        out.push_str(&format!(
            "Severity: good={} warning={} critical={}\n",
            counts.good, counts.warning, counts.critical
        ));
    }
    out.push_str(&format!("Conclusion: {}\n\n", fleet_statement(&counts)));

    out.push_str("4. Selected sample deviation\n");
    match &data.selected {
        Some(sel) if !sel.profile.is_empty() => {
            out.push_str(&format!("Sample: {}\n", sel.sample_id));
            out.push_str(&format!("Points: {}\n", sel.profile.wavelengths.len()));
            out.push_str(&format!(
                "Max deviation: {:.6}\nAvg deviation: {:.6}\n",
                sel.profile.max_deviation, sel.profile.avg_deviation
            ));
        }
        Some(sel) => {
            out.push_str(&format!(
                "Sample: {} (no baseline overlap; empty profile)\n",
                sel.sample_id
            ));
        }
        None => {
            out.push_str("No sample selected.\n");
        }
    }

    out
}

fn flag_name(flag: &crate::model::flags::Flag) -> &'static str {
    use crate::model::flags::Flag;
    match flag {
        Flag::InsufficientOverlap => "insufficient_overlap",
        Flag::PartialOverlap => "partial_overlap",
        Flag::ZeroVariance => "zero_variance",
        Flag::ZeroWeight => "zero_weight",
        Flag::UnweightedRegion => "unweighted_region",
    }
}

fn fleet_statement(counts: &SeverityCounts) -> &'static str {
    if counts.critical > 0 {
        "critical degradation present; immediate review recommended"
    } else if counts.warning > 0 {
        "early degradation signals present; schedule follow-up sampling"
    } else if counts.good > 0 {
        "all samples in expected agreement with baseline"
    } else {
        "no scorable samples"
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
