//! Centralized analysis constants
//!
//! All thresholds, activity-type sets, and duration heuristics used by the
//! rule engine and the metrics aggregator live here.

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

/// Validation rule thresholds
pub mod thresholds {
    /// Pipelines above this top-level activity count get a complexity finding
    pub const MAX_PIPELINE_ACTIVITIES: usize = 15;

    /// Pipelines above this activity count with zero parameters get a
    /// parameterization recommendation
    pub const PARAMETERLESS_ACTIVITY_COUNT: usize = 3;

    /// Minimum length of a lightweight sequential chain worth parallelizing
    pub const MIN_SEQUENTIAL_CHAIN: usize = 3;

    /// Complexity score cap
    pub const MAX_COMPLEXITY_SCORE: u32 = 100;

    /// Complexity score weights
    pub const ACTIVITY_WEIGHT: u32 = 5;
    pub const DEPTH_WEIGHT: u32 = 10;
    pub const CYCLE_WEIGHT: u32 = 20;
}

/// The data-movement activity kind (retry rule)
pub const COPY_KIND: &str = "Copy";

/// Kinds exempt from error-handling and timeout checks
///
/// Variable writes are in-memory operations without a failure mode worth
/// routing.
pub static CONDITION_EXEMPT_KINDS: Lazy<FxHashSet<&'static str>> =
    Lazy::new(|| ["SetVariable", "AppendVariable"].into_iter().collect());

/// Kinds that launch distributed compute and dominate run cost
pub static HEAVY_COMPUTE_KINDS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "DatabricksNotebook",
        "DatabricksSparkJar",
        "DatabricksSparkPython",
        "ExecuteDataFlow",
        "HDInsightSpark",
        "HDInsightHive",
        "HDInsightMapReduce",
        "SynapseNotebook",
    ]
    .into_iter()
    .collect()
});

/// Kinds cheap enough that a sequential chain of them is usually an accident
pub static LIGHTWEIGHT_KINDS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "Lookup",
        "GetMetadata",
        "SetVariable",
        "AppendVariable",
        "Wait",
        "Filter",
        "WebActivity",
    ]
    .into_iter()
    .collect()
});

/// Heuristic run-time range in minutes for an activity kind
///
/// Used by the runtime estimate along the critical path. Ranges are coarse
/// by design; explicit timeouts and wait durations override them.
pub fn duration_range_minutes(kind: &str) -> (u64, u64) {
    match kind {
        "Copy" => (5, 30),
        "ExecuteDataFlow" => (10, 45),
        "DatabricksNotebook" | "DatabricksSparkJar" | "DatabricksSparkPython" => (10, 60),
        "HDInsightSpark" | "HDInsightHive" | "HDInsightMapReduce" => (15, 60),
        "SynapseNotebook" => (10, 60),
        "Lookup" => (1, 5),
        "GetMetadata" => (1, 3),
        "SqlServerStoredProcedure" => (2, 15),
        "WebActivity" | "WebHook" => (1, 5),
        "ExecutePipeline" => (5, 30),
        "ForEach" | "Until" => (5, 30),
        "SetVariable" | "AppendVariable" | "Filter" | "IfCondition" | "Switch" => (0, 1),
        "Wait" => (0, 1),
        _ => (2, 10),
    }
}
