//! Analysis orchestration
//!
//! Runs the individual features in order over one pipeline definition and
//! assembles the final report.

pub mod orchestrator;
pub mod result;

pub use orchestrator::PipelineAnalyzer;
pub use result::AnalysisReport;
