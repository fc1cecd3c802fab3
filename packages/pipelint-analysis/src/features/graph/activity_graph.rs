//! Dependency graph over pipeline activities
//!
//! Nodes are activity names in definition order; an edge `B → A` means
//! "B depends on A". Dangling references are dropped at edge-insertion time
//! so traversals never leave the known activity set.

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::shared::models::{Activity, DependencyCondition};

/// Directed dependency graph for one pipeline
pub struct ActivityGraph {
    /// Graph (activity names + condition-tagged dependency edges)
    graph: DiGraph<String, Vec<DependencyCondition>>,

    /// Activity name → node index mapping
    name_to_node: FxHashMap<String, NodeIndex>,
}

impl ActivityGraph {
    /// Build the graph from a pipeline's top-level activities.
    ///
    /// Duplicate names collapse onto a single node; references to unknown
    /// activities are skipped.
    pub fn build(activities: &[Activity]) -> Self {
        let mut graph = DiGraph::new();
        let mut name_to_node = FxHashMap::default();

        for activity in activities {
            name_to_node
                .entry(activity.name.clone())
                .or_insert_with(|| graph.add_node(activity.name.clone()));
        }

        for activity in activities {
            let from = name_to_node[&activity.name];
            for dep in &activity.depends_on {
                match name_to_node.get(&dep.activity) {
                    Some(&to) => {
                        graph.add_edge(from, to, dep.conditions.clone());
                    }
                    None => {
                        debug!(
                            activity = %activity.name,
                            reference = %dep.activity,
                            "dropping dangling dependency reference"
                        );
                    }
                }
            }
        }

        Self {
            graph,
            name_to_node,
        }
    }

    /// Number of activities in the graph
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of resolved dependency edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether an activity name is known
    pub fn contains(&self, name: &str) -> bool {
        self.name_to_node.contains_key(name)
    }

    /// Activity names in definition order
    pub fn node_names(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].as_str())
            .collect()
    }

    /// Resolved predecessors of an activity, in dependency-list order
    pub fn dependencies(&self, name: &str) -> Vec<&str> {
        self.neighbors(name, Direction::Outgoing)
    }

    /// Activities that depend on the given one
    pub fn dependents(&self, name: &str) -> Vec<&str> {
        self.neighbors(name, Direction::Incoming)
    }

    /// Resolved edges as `(dependent, predecessor, conditions)`
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &[DependencyCondition])> {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()].as_str(),
                self.graph[edge.target()].as_str(),
                edge.weight().as_slice(),
            )
        })
    }

    /// Topological execution order (predecessors first), or `None` when the
    /// graph is cyclic.
    pub fn execution_order(&self) -> Option<Vec<String>> {
        let sorted = toposort(&self.graph, None).ok()?;

        // toposort emits dependents before their predecessors here (edges
        // point dependent → dependency), so reverse for execution order.
        Some(
            sorted
                .into_iter()
                .rev()
                .map(|idx| self.graph[idx].clone())
                .collect(),
        )
    }

    fn neighbors(&self, name: &str, direction: Direction) -> Vec<&str> {
        let Some(&node) = self.name_to_node.get(name) else {
            return Vec::new();
        };

        // petgraph walks neighbors most-recent-edge first; reverse to
        // restore insertion order.
        let mut out: Vec<&str> = self
            .graph
            .neighbors_directed(node, direction)
            .map(|idx| self.graph[idx].as_str())
            .collect();
        out.reverse();
        out
    }
}
