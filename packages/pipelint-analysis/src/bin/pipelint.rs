//! Pipeline analysis CLI
//!
//! # Usage
//!
//! ```bash
//! # Full JSON report
//! pipelint pipeline.json
//!
//! # Human-readable summary
//! pipelint pipeline.json --format text
//!
//! # Read from stdin
//! cat pipeline.json | pipelint -
//! ```

use clap::{Parser, ValueEnum};
use pipelint_analysis::{AnalysisReport, PipelineAnalyzer, Severity};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pipelint")]
#[command(about = "Dependency and validation analysis for pipeline definitions", long_about = None)]
struct Cli {
    /// Pipeline definition file, or `-` for stdin
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let raw = if cli.input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(&cli.input)?
    };

    let report = match PipelineAnalyzer::new().analyze_json(&raw) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("pipelint: {err}");
            std::process::exit(1);
        }
    };

    match cli.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Text => print_summary(&report),
    }

    Ok(())
}

fn print_summary(report: &AnalysisReport) {
    let name = report.pipeline_name.as_deref().unwrap_or("<unnamed>");
    println!("pipeline: {name}");
    println!("activities: {}", report.activity_count);

    if report.is_acyclic() {
        println!("cycles: none");
    } else {
        println!("cycles: {}", report.cycles.len());
        for cycle in &report.cycles {
            println!("  {}", cycle.join(" -> "));
        }
    }

    println!(
        "critical path ({} deep): {}",
        report.max_depth,
        report.critical_path.join(" -> ")
    );

    for group in &report.parallel_groups {
        println!(
            "parallel at depth {}: {}",
            group.depth,
            group.activities.join(", ")
        );
    }

    if !report.orphans.is_empty() {
        println!("orphans: {}", report.orphans.join(", "));
    }

    println!(
        "findings: {} critical, {} warnings, {} recommendations",
        report.finding_count(Severity::Critical),
        report.finding_count(Severity::Warning),
        report.finding_count(Severity::Recommendation),
    );
    for finding in &report.findings {
        match &finding.activity {
            Some(activity) => println!(
                "  [{}] {} ({}): {}",
                finding.severity.as_str(),
                finding.category.as_str(),
                activity,
                finding.message
            ),
            None => println!(
                "  [{}] {}: {}",
                finding.severity.as_str(),
                finding.category.as_str(),
                finding.message
            ),
        }
    }

    println!(
        "error coverage: {:.1}%",
        report.metrics.error_coverage_pct
    );
    println!("complexity score: {}/100", report.metrics.complexity_score);
    println!(
        "estimated runtime: {}-{} min",
        report.metrics.estimated_runtime.min_minutes,
        report.metrics.estimated_runtime.max_minutes
    );
}
