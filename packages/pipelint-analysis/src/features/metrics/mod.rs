//! Summary metrics derived from the graph analyses

pub mod aggregator;

pub use aggregator::{aggregate_metrics, PipelineMetrics, RuntimeEstimate};
