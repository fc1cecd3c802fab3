//! Metrics aggregation
//!
//! Pure summaries over the parsed pipeline and the graph analysis results:
//! an activity-type histogram, failure-handling coverage, a bounded
//! complexity score, and a coarse runtime estimate along the critical path.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::features::graph::{ActivityGraph, DepthReport};
use crate::shared::constants::{duration_range_minutes, thresholds};
use crate::shared::models::{ActivityControl, Pipeline};

/// Coarse run-time estimate in minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeEstimate {
    pub min_minutes: u64,
    pub max_minutes: u64,
}

/// Summary statistics for one pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineMetrics {
    /// Top-level activity count per type tag (sorted keys)
    pub activity_types: BTreeMap<String, usize>,
    /// Share of predecessors covered by a Failed/Completed condition, as a
    /// percentage of activities that have dependencies; 100 when none do
    pub error_coverage_pct: f64,
    /// Bounded 0–100 structural complexity score
    pub complexity_score: u32,
    /// Heuristic runtime range along the critical path
    pub estimated_runtime: RuntimeEstimate,
}

/// Derive summary metrics. `cycle_count` comes from the cycle detector run.
pub fn aggregate_metrics(
    pipeline: &Pipeline,
    graph: &ActivityGraph,
    depth_report: &DepthReport,
    cycle_count: usize,
) -> PipelineMetrics {
    PipelineMetrics {
        activity_types: type_histogram(pipeline),
        error_coverage_pct: error_coverage(pipeline, graph),
        complexity_score: complexity_score(
            pipeline.activity_count(),
            depth_report.max_depth,
            cycle_count,
        ),
        estimated_runtime: estimate_runtime(pipeline, &depth_report.critical_path),
    }
}

fn type_histogram(pipeline: &Pipeline) -> BTreeMap<String, usize> {
    let mut histogram: BTreeMap<String, usize> = BTreeMap::new();
    for activity in &pipeline.activities {
        *histogram.entry(activity.kind.clone()).or_default() += 1;
    }
    histogram
}

fn error_coverage(pipeline: &Pipeline, graph: &ActivityGraph) -> f64 {
    let dependent_count = pipeline
        .activities
        .iter()
        .filter(|a| !a.depends_on.is_empty())
        .count();
    if dependent_count == 0 {
        return 100.0;
    }

    let covered: FxHashSet<&str> = graph
        .edges()
        .filter(|(_, _, conditions)| conditions.iter().any(|c| c.handles_failure()))
        .map(|(_, predecessor, _)| predecessor)
        .collect();

    let pct = covered.len() as f64 / dependent_count as f64 * 100.0;
    // One decimal place; the ratio compares two different populations, so
    // clamp pathological fan-in inputs at 100.
    (pct.min(100.0) * 10.0).round() / 10.0
}

fn complexity_score(activity_count: usize, max_depth: usize, cycle_count: usize) -> u32 {
    let raw = thresholds::ACTIVITY_WEIGHT * activity_count as u32
        + thresholds::DEPTH_WEIGHT * max_depth as u32
        + thresholds::CYCLE_WEIGHT * cycle_count as u32;
    raw.min(thresholds::MAX_COMPLEXITY_SCORE)
}

fn estimate_runtime(pipeline: &Pipeline, critical_path: &[String]) -> RuntimeEstimate {
    let mut min_minutes = 0;
    let mut max_minutes = 0;

    for name in critical_path {
        let Some(activity) = pipeline.activities.iter().find(|a| &a.name == name) else {
            continue;
        };

        // A Wait contributes its exact duration; an explicit timeout caps
        // the heuristic upper bound.
        if let Some(ActivityControl::Wait { seconds }) = &activity.control {
            let minutes = seconds.div_ceil(60);
            min_minutes += minutes;
            max_minutes += minutes;
            continue;
        }

        let (mut lo, mut hi) = duration_range_minutes(&activity.kind);
        if let Some(timeout) = activity.timeout() {
            hi = (timeout.as_secs()).div_ceil(60);
            lo = lo.min(hi);
        }
        min_minutes += lo;
        max_minutes += hi;
    }

    RuntimeEstimate {
        min_minutes,
        max_minutes,
    }
}
