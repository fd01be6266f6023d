//! Grouped summaries over a finished batch

use crate::roster::{is_male, DISTANCES_M, PACED_RATES};
use rr_processing::{BatchReport, BatchSummary};
use tracing::{info, warn};

/// One labelled slice of the cohort
#[derive(Debug)]
pub struct GroupSummary {
    pub label: String,
    pub summary: BatchSummary,
}

/// Medians over the whole cohort and the standard groupings: camera
/// distance, paced rate and proband sex.
pub fn group_summaries(report: &BatchReport) -> Vec<GroupSummary> {
    let mut groups = Vec::new();

    let mut push = |label: String, summary: Option<BatchSummary>| {
        if let Some(summary) = summary {
            groups.push(GroupSummary { label, summary });
        }
    };

    push("all".to_string(), report.summary());

    for &distance in &DISTANCES_M {
        push(
            format!("distance {}m", distance),
            report.summary_where(|k| k.distance_m == distance),
        );
    }
    for &rate in &PACED_RATES {
        push(
            format!("paced {}bpm", rate),
            report.summary_where(|k| k.paced_bpm == rate),
        );
    }
    push(
        "male".to_string(),
        report.summary_where(|k| is_male(k.proband)),
    );
    push(
        "female".to_string(),
        report.summary_where(|k| !is_male(k.proband)),
    );

    groups
}

pub fn log_report(report: &BatchReport) {
    for (key, err) in report.failed() {
        warn!(recording = %key, error = %err, "pair skipped");
    }

    for group in group_summaries(report) {
        info!(
            group = %group.label,
            pairs = group.summary.pairs,
            median_r = group.summary.median_correlation,
            median_abs_err_bpm = group.summary.median_abs_error_bpm,
            median_rel_err_pct = group.summary.median_rel_error_pct,
            "group summary"
        );
    }
}
