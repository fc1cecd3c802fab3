//! Analysis orchestrator
//!
//! Stage order: graph build → cycle detection → depth analysis → orphan
//! detection → rule evaluation → metrics. The whole run is pure and
//! synchronous; identical input yields an identical report.

use tracing::{debug, info};

use super::result::AnalysisReport;
use crate::errors::Result;
use crate::features::graph::{analyze_depths, detect_cycles, find_orphans, ActivityGraph};
use crate::features::metrics::aggregate_metrics;
use crate::features::parsing::parse_pipeline;
use crate::features::validation::evaluate_rules;
use crate::shared::models::Pipeline;

/// Stateless pipeline analyzer
#[derive(Debug, Default)]
pub struct PipelineAnalyzer;

impl PipelineAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Parse raw JSON and analyze the resulting pipeline.
    pub fn analyze_json(&self, raw: &str) -> Result<AnalysisReport> {
        let pipeline = parse_pipeline(raw)?;
        Ok(self.analyze(&pipeline))
    }

    /// Analyze an already-parsed pipeline.
    pub fn analyze(&self, pipeline: &Pipeline) -> AnalysisReport {
        info!(
            pipeline = %pipeline.display_name(),
            activities = pipeline.activity_count(),
            "analyzing pipeline"
        );

        let graph = ActivityGraph::build(&pipeline.activities);
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "dependency graph built"
        );

        let cycles = detect_cycles(&graph);
        if !cycles.is_empty() {
            info!(count = cycles.len(), "dependency cycles detected");
        }

        let depth_report = analyze_depths(&pipeline.activities, &graph);
        debug!(max_depth = depth_report.max_depth, "depth analysis complete");

        let orphans = find_orphans(&pipeline.activities, &graph);
        let findings = evaluate_rules(pipeline, &graph);
        let metrics = aggregate_metrics(pipeline, &graph, &depth_report, cycles.len());

        info!(
            findings = findings.len(),
            complexity = metrics.complexity_score,
            "analysis complete"
        );

        AnalysisReport {
            pipeline_name: pipeline.name.clone(),
            activity_count: pipeline.activity_count(),
            cycles,
            max_depth: depth_report.max_depth,
            critical_path: depth_report.critical_path,
            parallel_groups: depth_report.parallel_groups,
            execution_order: graph.execution_order(),
            orphans,
            findings,
            metrics,
        }
    }
}
