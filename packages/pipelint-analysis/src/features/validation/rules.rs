//! Validation rule engine
//!
//! Rules run in a fixed order and accumulate findings without
//! short-circuiting, so output order is stable for identical input.

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};

use super::domain::{Finding, FindingCategory, Severity};
use crate::features::graph::ActivityGraph;
use crate::shared::constants::{
    thresholds, CONDITION_EXEMPT_KINDS, COPY_KIND, HEAVY_COMPUTE_KINDS, LIGHTWEIGHT_KINDS,
};
use crate::shared::models::{Activity, ActivityControl, Pipeline};

/// `@variables('name')` references inside a loop exit expression
static VARIABLE_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"variables\('([^']+)'\)").expect("static pattern is valid"));

/// Run every rule against the pipeline. Stateless and deterministic.
pub fn evaluate_rules(pipeline: &Pipeline, graph: &ActivityGraph) -> Vec<Finding> {
    let mut findings = Vec::new();

    check_error_handling(pipeline, &mut findings);
    check_parameter_docs(pipeline, &mut findings);
    check_pipeline_size(pipeline, &mut findings);
    check_activity_docs(pipeline, &mut findings);
    check_copy_retries(pipeline, &mut findings);
    check_timeouts(pipeline, &mut findings);
    check_parameterization(pipeline, &mut findings);
    check_pipeline_docs(pipeline, &mut findings);
    check_sequential_chains(pipeline, graph, &mut findings);
    check_unbounded_heavy_foreach(pipeline, &mut findings);
    check_until_exit_conditions(pipeline, &mut findings);

    findings
}

/// Rule 1: a dependent activity whose conditions never route a failure has
/// no error-handling path.
fn check_error_handling(pipeline: &Pipeline, findings: &mut Vec<Finding>) {
    for activity in &pipeline.activities {
        if activity.depends_on.is_empty()
            || CONDITION_EXEMPT_KINDS.contains(activity.kind.as_str())
        {
            continue;
        }
        if !activity.depends_on.iter().any(|d| d.handles_failure()) {
            findings.push(Finding::activity(
                Severity::Critical,
                FindingCategory::ErrorHandling,
                &activity.name,
                "none of its dependencies use a Failed or Completed condition; \
                 upstream failures have no handling path",
            ));
        }
    }
}

/// Rule 2: undocumented parameters.
fn check_parameter_docs(pipeline: &Pipeline, findings: &mut Vec<Finding>) {
    for param in &pipeline.parameters {
        if param.description.as_deref().map_or(true, str::is_empty) {
            findings.push(Finding::pipeline(
                Severity::Critical,
                FindingCategory::Documentation,
                format!("parameter '{}' has no description", param.name),
            ));
        }
    }
}

/// Rule 3: oversized pipeline.
fn check_pipeline_size(pipeline: &Pipeline, findings: &mut Vec<Finding>) {
    let count = pipeline.activity_count();
    if count > thresholds::MAX_PIPELINE_ACTIVITIES {
        findings.push(Finding::pipeline(
            Severity::Critical,
            FindingCategory::Complexity,
            format!(
                "pipeline has {count} activities (recommended maximum {}); \
                 consider splitting into child pipelines",
                thresholds::MAX_PIPELINE_ACTIVITIES
            ),
        ));
    }
}

/// Rule 4: undocumented activities.
fn check_activity_docs(pipeline: &Pipeline, findings: &mut Vec<Finding>) {
    for activity in &pipeline.activities {
        if activity.description.as_deref().map_or(true, str::is_empty) {
            findings.push(Finding::activity(
                Severity::Warning,
                FindingCategory::Documentation,
                &activity.name,
                "activity has no description",
            ));
        }
    }
}

/// Rule 5: data-movement activities without retries.
fn check_copy_retries(pipeline: &Pipeline, findings: &mut Vec<Finding>) {
    for activity in &pipeline.activities {
        if activity.kind == COPY_KIND && activity.retry_count().unwrap_or(0) == 0 {
            findings.push(Finding::activity(
                Severity::Warning,
                FindingCategory::Resilience,
                &activity.name,
                "copy activity has no retry policy; transient source/sink \
                 failures will fail the run",
            ));
        }
    }
}

/// Rule 6: missing timeouts.
fn check_timeouts(pipeline: &Pipeline, findings: &mut Vec<Finding>) {
    for activity in &pipeline.activities {
        if CONDITION_EXEMPT_KINDS.contains(activity.kind.as_str()) {
            continue;
        }
        if activity.timeout().is_none() {
            findings.push(Finding::activity(
                Severity::Warning,
                FindingCategory::Resilience,
                &activity.name,
                "activity has no timeout configured",
            ));
        }
    }
}

/// Rule 7: non-trivial pipeline without parameters.
fn check_parameterization(pipeline: &Pipeline, findings: &mut Vec<Finding>) {
    if pipeline.parameters.is_empty()
        && pipeline.activity_count() > thresholds::PARAMETERLESS_ACTIVITY_COUNT
    {
        findings.push(Finding::pipeline(
            Severity::Recommendation,
            FindingCategory::Parameterization,
            "pipeline defines no parameters; environment-specific values are \
             likely hard-coded",
        ));
    }
}

/// Rule 8: missing pipeline description.
fn check_pipeline_docs(pipeline: &Pipeline, findings: &mut Vec<Finding>) {
    if pipeline.description.as_deref().map_or(true, str::is_empty) {
        findings.push(Finding::pipeline(
            Severity::Recommendation,
            FindingCategory::Documentation,
            "pipeline has no description",
        ));
    }
}

/// Rule 9: long sequential chains of lightweight activities.
fn check_sequential_chains(
    pipeline: &Pipeline,
    graph: &ActivityGraph,
    findings: &mut Vec<Finding>,
) {
    let by_name: FxHashMap<&str, &Activity> = pipeline
        .activities
        .iter()
        .map(|a| (a.name.as_str(), a))
        .collect();

    // A link P → S qualifies when S is P's only dependent and P is S's only
    // resolved dependency.
    let link_qualifies = |pred: &str, succ: &str| -> bool {
        graph.dependents(pred) == vec![succ] && graph.dependencies(succ) == vec![pred]
    };

    for head in &pipeline.activities {
        // Chain heads have no qualifying backward link.
        let backward = graph.dependencies(&head.name);
        if backward.len() == 1 && link_qualifies(backward[0], &head.name) {
            continue;
        }

        let mut chain = vec![head.name.as_str()];
        let mut on_chain: FxHashSet<&str> = chain.iter().copied().collect();
        let mut current = head.name.as_str();

        loop {
            let dependents = graph.dependents(current);
            if dependents.len() != 1 {
                break;
            }
            let next = dependents[0];
            if !link_qualifies(current, next) || !on_chain.insert(next) {
                break;
            }
            chain.push(next);
            current = next;
        }

        let all_lightweight = chain.iter().all(|name| {
            by_name
                .get(name)
                .map_or(false, |a| LIGHTWEIGHT_KINDS.contains(a.kind.as_str()))
        });

        if chain.len() >= thresholds::MIN_SEQUENTIAL_CHAIN && all_lightweight {
            findings.push(Finding::pipeline(
                Severity::Recommendation,
                FindingCategory::Performance,
                format!(
                    "sequential chain {} consists of lightweight activities; \
                     they could run in parallel",
                    chain.join(" -> ")
                ),
            ));
        }
    }
}

/// Rule 10: parallel ForEach over heavy compute with unbounded concurrency.
fn check_unbounded_heavy_foreach(pipeline: &Pipeline, findings: &mut Vec<Finding>) {
    for activity in all_activities(pipeline) {
        let Some(ActivityControl::ForEach {
            is_sequential: false,
            batch_count: None,
            activities: inner,
        }) = &activity.control
        else {
            continue;
        };

        let heavy = inner
            .iter()
            .flat_map(|a| std::iter::once(a).chain(a.descendants()))
            .find(|a| HEAVY_COMPUTE_KINDS.contains(a.kind.as_str()));

        if let Some(heavy) = heavy {
            findings.push(Finding::activity(
                Severity::Warning,
                FindingCategory::Cost,
                &activity.name,
                format!(
                    "parallel ForEach runs heavy compute ('{}', {}) with \
                     unbounded concurrency; set a batch count",
                    heavy.name, heavy.kind
                ),
            ));
        }
    }
}

/// Rule 11: Until loops whose exit variables are never written inside the
/// loop body.
fn check_until_exit_conditions(pipeline: &Pipeline, findings: &mut Vec<Finding>) {
    for activity in all_activities(pipeline) {
        let Some(ActivityControl::Until {
            expression,
            activities: inner,
        }) = &activity.control
        else {
            continue;
        };

        let referenced: Vec<&str> = VARIABLE_REF
            .captures_iter(expression)
            .map(|c| c.get(1).expect("capture group 1 exists").as_str())
            .collect();
        if referenced.is_empty() {
            continue;
        }

        let mutated: FxHashSet<&str> = inner
            .iter()
            .flat_map(|a| std::iter::once(a).chain(a.descendants()))
            .filter_map(|a| match &a.control {
                Some(ActivityControl::SetVariable { variable_name }) => {
                    Some(variable_name.as_str())
                }
                _ => None,
            })
            .collect();

        if referenced.iter().all(|name| !mutated.contains(name)) {
            findings.push(Finding::activity(
                Severity::Warning,
                FindingCategory::LoopSafety,
                &activity.name,
                format!(
                    "exit condition references {} but no inner activity \
                     updates them; possible infinite loop",
                    referenced
                        .iter()
                        .map(|v| format!("'{v}'"))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            ));
        }
    }
}

/// Top-level activities plus every nested activity, definition order first.
fn all_activities(pipeline: &Pipeline) -> Vec<&Activity> {
    let mut out = Vec::new();
    for activity in &pipeline.activities {
        out.push(activity);
        out.extend(activity.descendants());
    }
    out
}
