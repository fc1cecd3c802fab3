/*
 * pipelint-analysis - Pipeline dependency & validation analysis engine
 *
 * Feature-first layout:
 * - shared/   : Common models and constants
 * - features/ : Vertical slices (parsing → graph → validation → metrics)
 * - pipeline/ : Orchestration and the final report
 *
 * The whole analysis is a pure, synchronous computation over an in-memory
 * activity graph: no I/O, no shared state, no background work.
 */

/// Shared models and constants
pub mod shared;

/// Feature modules (parsing, graph, validation, metrics)
pub mod features;

/// Analysis orchestration
pub mod pipeline;

/// Error types
pub mod errors;

// Re-exports for the public API
pub use errors::{PipelintError, Result};
pub use features::graph::{ActivityGraph, DepthReport, ParallelGroup};
pub use features::metrics::{PipelineMetrics, RuntimeEstimate};
pub use features::parsing::parse_pipeline;
pub use features::validation::{Finding, FindingCategory, Severity};
pub use pipeline::{AnalysisReport, PipelineAnalyzer};
pub use shared::models::{
    Activity, ActivityControl, ActivityPolicy, Dependency, DependencyCondition, Parameter,
    Pipeline,
};
