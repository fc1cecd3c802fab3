//! Pipeline definition parsing
//!
//! Tolerant JSON → [`Pipeline`](crate::shared::models::Pipeline) conversion.

pub mod pipeline_parser;

pub use pipeline_parser::parse_pipeline;
