//! Longest-chain depth analysis
//!
//! `depth(a)` is the length of the longest dependency chain ending at `a`:
//! 1 for an activity with no resolved dependencies, otherwise
//! `1 + max(depth(dep))`. Memoized and iterative; an edge back into an
//! in-progress node contributes 0 so cyclic input cannot hang the analysis
//! (cycle reporting itself is the cycle detector's job).

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::activity_graph::ActivityGraph;
use crate::shared::models::{Activity, Dependency};

/// Activities sharing one depth level (candidates for parallel execution)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelGroup {
    pub depth: usize,
    pub activities: Vec<String>,
}

/// Depth analysis output
#[derive(Debug, Clone)]
pub struct DepthReport {
    /// Longest chain length per activity
    pub depths: FxHashMap<String, usize>,
    /// Global maximum depth (0 for an empty pipeline)
    pub max_depth: usize,
    /// Longest dependency-ordered chain, root first
    pub critical_path: Vec<String>,
    /// Depth buckets with at least two members, ascending by depth
    pub parallel_groups: Vec<ParallelGroup>,
}

/// Compute depths, the critical path, and parallel groups.
pub fn analyze_depths(activities: &[Activity], graph: &ActivityGraph) -> DepthReport {
    let mut depths: FxHashMap<String, usize> = FxHashMap::default();

    for activity in activities {
        compute_depth(&activity.name, graph, &mut depths);
    }

    let max_depth = activities
        .iter()
        .filter_map(|a| depths.get(&a.name))
        .copied()
        .max()
        .unwrap_or(0);

    let critical_path = backtrack_critical_path(activities, graph, &depths, max_depth);
    let parallel_groups = group_by_depth(activities, &depths);

    DepthReport {
        depths,
        max_depth,
        critical_path,
        parallel_groups,
    }
}

struct Frame {
    name: String,
    deps: Vec<String>,
    next: usize,
    best: usize,
}

fn compute_depth(name: &str, graph: &ActivityGraph, memo: &mut FxHashMap<String, usize>) {
    if memo.contains_key(name) || !graph.contains(name) {
        return;
    }

    let mut in_progress: FxHashSet<String> = FxHashSet::default();
    let mut stack: Vec<Frame> = Vec::new();

    in_progress.insert(name.to_owned());
    stack.push(Frame {
        name: name.to_owned(),
        deps: graph
            .dependencies(name)
            .into_iter()
            .map(str::to_owned)
            .collect(),
        next: 0,
        best: 0,
    });

    while let Some(frame) = stack.last_mut() {
        if frame.next < frame.deps.len() {
            let child = frame.deps[frame.next].clone();
            frame.next += 1;

            if let Some(&depth) = memo.get(&child) {
                frame.best = frame.best.max(depth);
            } else if !in_progress.contains(&child) {
                in_progress.insert(child.clone());
                let deps = graph
                    .dependencies(&child)
                    .into_iter()
                    .map(str::to_owned)
                    .collect();
                stack.push(Frame {
                    name: child,
                    deps,
                    next: 0,
                    best: 0,
                });
            }
            // An in-progress child is a back edge; it contributes 0.
        } else {
            let depth = frame.best + 1;
            let done = frame.name.clone();
            memo.insert(done.clone(), depth);
            in_progress.remove(&done);
            stack.pop();
            if let Some(parent) = stack.last_mut() {
                parent.best = parent.best.max(depth);
            }
        }
    }
}

fn backtrack_critical_path(
    activities: &[Activity],
    graph: &ActivityGraph,
    depths: &FxHashMap<String, usize>,
    max_depth: usize,
) -> Vec<String> {
    if max_depth == 0 {
        return Vec::new();
    }

    let by_name: FxHashMap<&str, &Activity> = activities
        .iter()
        .map(|a| (a.name.as_str(), a))
        .collect();

    // First activity (definition order) at the global maximum depth is the
    // chain terminal.
    let Some(terminal) = activities
        .iter()
        .find(|a| depths.get(&a.name) == Some(&max_depth))
    else {
        return Vec::new();
    };

    let mut path = vec![terminal.name.clone()];
    let mut on_path: FxHashSet<String> = path.iter().cloned().collect();
    let mut current = terminal;

    loop {
        // Follow the resolved dependency with the largest depth, ties broken
        // by dependency-list order (max_by_key would keep the last maximum).
        let mut next: Option<&Dependency> = None;
        let mut next_depth = 0usize;
        for dep in current.depends_on.iter().filter(|d| graph.contains(&d.activity)) {
            let depth = depths.get(&dep.activity).copied().unwrap_or(0);
            if next.is_none() || depth > next_depth {
                next = Some(dep);
                next_depth = depth;
            }
        }

        let Some(next) = next else {
            break;
        };
        if on_path.contains(&next.activity) {
            // Cyclic input; stop rather than loop.
            break;
        }
        let Some(next_activity) = by_name.get(next.activity.as_str()).copied() else {
            break;
        };

        path.push(next.activity.clone());
        on_path.insert(next.activity.clone());
        current = next_activity;
    }

    path.reverse();
    path
}

fn group_by_depth(
    activities: &[Activity],
    depths: &FxHashMap<String, usize>,
) -> Vec<ParallelGroup> {
    let mut buckets: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    let mut seen: FxHashSet<&str> = FxHashSet::default();

    for activity in activities {
        if !seen.insert(activity.name.as_str()) {
            continue;
        }
        if let Some(&depth) = depths.get(&activity.name) {
            buckets.entry(depth).or_default().push(activity.name.clone());
        }
    }

    buckets
        .into_iter()
        .filter(|(_, members)| members.len() >= 2)
        .map(|(depth, activities)| ParallelGroup { depth, activities })
        .collect()
}
