//! Final analysis report

use serde::{Deserialize, Serialize};

use crate::features::graph::ParallelGroup;
use crate::features::metrics::PipelineMetrics;
use crate::features::validation::{Finding, Severity};

/// Everything one analysis run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Pipeline name, when the definition carries one
    pub pipeline_name: Option<String>,
    /// Top-level activity count
    pub activity_count: usize,
    /// Dependency cycles, each closing back on its first member
    pub cycles: Vec<Vec<String>>,
    /// Longest dependency chain length
    pub max_depth: usize,
    /// Longest dependency-ordered chain, root first
    pub critical_path: Vec<String>,
    /// Depth buckets with parallelizable members
    pub parallel_groups: Vec<ParallelGroup>,
    /// Topological execution order; absent when the graph is cyclic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_order: Option<Vec<String>>,
    /// Activities disconnected from the graph
    pub orphans: Vec<String>,
    /// Advisory findings in rule-evaluation order
    pub findings: Vec<Finding>,
    /// Summary metrics
    pub metrics: PipelineMetrics,
}

impl AnalysisReport {
    /// Whether the dependency graph is a DAG
    pub fn is_acyclic(&self) -> bool {
        self.cycles.is_empty()
    }

    /// Number of findings at a given severity
    pub fn finding_count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }
}
