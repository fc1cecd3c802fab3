//! Cycle detection over the activity graph
//!
//! Iterative depth-first search with an explicit stack, so pathological
//! inputs cannot overflow the call stack. Each closing edge is reported
//! once: fully-explored nodes are never re-expanded.

use rustc_hash::FxHashMap;

use super::activity_graph::ActivityGraph;

#[derive(Clone, Copy, PartialEq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

struct Frame {
    name: String,
    deps: Vec<String>,
    next: usize,
}

/// Find dependency cycles, each reported as a path closing back on its
/// first member (e.g. `["A", "B", "A"]`; a self-loop yields `["A", "A"]`).
pub fn detect_cycles(graph: &ActivityGraph) -> Vec<Vec<String>> {
    let mut state: FxHashMap<String, VisitState> = graph
        .node_names()
        .into_iter()
        .map(|n| (n.to_owned(), VisitState::Unvisited))
        .collect();

    let mut cycles = Vec::new();

    for start in graph.node_names() {
        if state[start] != VisitState::Unvisited {
            continue;
        }

        let mut path: Vec<String> = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();

        state.insert(start.to_owned(), VisitState::InProgress);
        path.push(start.to_owned());
        stack.push(Frame {
            name: start.to_owned(),
            deps: owned(graph.dependencies(start)),
            next: 0,
        });

        while let Some(frame) = stack.last_mut() {
            if frame.next < frame.deps.len() {
                let child = frame.deps[frame.next].clone();
                frame.next += 1;

                match state[&child] {
                    VisitState::Unvisited => {
                        state.insert(child.clone(), VisitState::InProgress);
                        path.push(child.clone());
                        let deps = owned(graph.dependencies(&child));
                        stack.push(Frame {
                            name: child,
                            deps,
                            next: 0,
                        });
                    }
                    VisitState::InProgress => {
                        // Closing edge back into the current path: emit the
                        // slice from the child's first occurrence onward.
                        let pos = path
                            .iter()
                            .position(|n| *n == child)
                            .expect("in-progress node must be on the path");
                        let mut cycle = path[pos..].to_vec();
                        cycle.push(child);
                        cycles.push(cycle);
                    }
                    VisitState::Done => {}
                }
            } else {
                state.insert(frame.name.clone(), VisitState::Done);
                path.pop();
                stack.pop();
            }
        }
    }

    cycles
}

fn owned(names: Vec<&str>) -> Vec<String> {
    names.into_iter().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::{Activity, Dependency};

    fn graph_of(activities: Vec<Activity>) -> ActivityGraph {
        ActivityGraph::build(&activities)
    }

    #[test]
    fn test_dag_has_no_cycles() {
        let graph = graph_of(vec![
            Activity::new("A", "Lookup"),
            Activity::new("B", "Copy").with_dependencies(vec![Dependency::on("A")]),
            Activity::new("C", "Copy").with_dependencies(vec![Dependency::on("A")]),
        ]);
        assert!(detect_cycles(&graph).is_empty());
    }

    #[test]
    fn test_two_node_cycle() {
        let graph = graph_of(vec![
            Activity::new("A", "Copy").with_dependencies(vec![Dependency::on("B")]),
            Activity::new("B", "Copy").with_dependencies(vec![Dependency::on("A")]),
        ]);
        let cycles = detect_cycles(&graph);
        assert_eq!(cycles, vec![vec!["A".to_string(), "B".into(), "A".into()]]);
    }

    #[test]
    fn test_self_loop() {
        let graph = graph_of(vec![
            Activity::new("A", "Copy").with_dependencies(vec![Dependency::on("A")])
        ]);
        let cycles = detect_cycles(&graph);
        assert_eq!(cycles, vec![vec!["A".to_string(), "A".into()]]);
    }

    #[test]
    fn test_cycle_reported_once_across_entry_points() {
        // C and D both lead into the A↔B cycle; it must be reported once.
        let graph = graph_of(vec![
            Activity::new("C", "Copy").with_dependencies(vec![Dependency::on("A")]),
            Activity::new("D", "Copy").with_dependencies(vec![Dependency::on("B")]),
            Activity::new("A", "Copy").with_dependencies(vec![Dependency::on("B")]),
            Activity::new("B", "Copy").with_dependencies(vec![Dependency::on("A")]),
        ]);
        let cycles = detect_cycles(&graph);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 3);
        assert_eq!(cycles[0].first(), cycles[0].last());
    }

    #[test]
    fn test_longer_cycle_path() {
        let graph = graph_of(vec![
            Activity::new("A", "Copy").with_dependencies(vec![Dependency::on("C")]),
            Activity::new("B", "Copy").with_dependencies(vec![Dependency::on("A")]),
            Activity::new("C", "Copy").with_dependencies(vec![Dependency::on("B")]),
        ]);
        let cycles = detect_cycles(&graph);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 4);
        assert_eq!(cycles[0].first(), cycles[0].last());
    }
}
