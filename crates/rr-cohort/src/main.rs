//! Cohort comparison runner
//!
//! Compares the camera and belt recording of every proband/rate/distance
//! combination and logs grouped median statistics. Runs against the
//! simulated recording source; a disk-backed source plugs in through the
//! same trait.

mod report;
mod roster;

use anyhow::Result;
use rr_core::{FilterMethod, RecordingSource};
use rr_processing::{BatchReport, Comparator, CompareConfig, PairOutcome};
use rr_simulation::SimulatedCohort;
use tokio::task::JoinSet;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let comparator = Comparator::new(CompareConfig::default())?;
    let source = SimulatedCohort::new(2024);
    let keys = roster::cohort_keys(FilterMethod::Median);

    info!(pairs = keys.len(), "starting cohort comparison run");

    let mut tasks = JoinSet::new();
    for key in keys {
        let comparator = comparator.clone();
        let source = source.clone();
        tasks.spawn_blocking(move || PairOutcome {
            key,
            result: source
                .load_pair(&key)
                .and_then(|pair| comparator.compare(&pair)),
        });
    }

    let mut outcomes = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let outcome = joined?;
        if let Ok(result) = &outcome.result {
            debug!(
                recording = %outcome.key,
                lag_steps = result.lag_steps,
                r = result.metrics.correlation,
                "pair done"
            );
        }
        outcomes.push(outcome);
    }
    outcomes.sort_by_key(|o| (o.key.paced_bpm, o.key.distance_m, o.key.proband));

    let batch = BatchReport::from_outcomes(outcomes);
    report::log_report(&batch);

    info!(
        completed = batch.completed().count(),
        failed = batch.failed().count(),
        "cohort run finished"
    );

    Ok(())
}
