//! Advisory validation rules
//!
//! Stateless lint pass over a parsed pipeline and its dependency graph.

pub mod domain;
pub mod rules;

pub use domain::{Finding, FindingCategory, Severity};
pub use rules::evaluate_rules;
