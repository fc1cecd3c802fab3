//! Orphan activity detection
//!
//! An activity is orphaned when it has no resolved edges in either
//! direction: nothing it depends on, nothing depending on it. A dependency
//! whose reference is dangling does not count as an edge.

use rustc_hash::FxHashSet;

use super::activity_graph::ActivityGraph;
use crate::shared::models::Activity;

/// Activities disconnected from the dependency graph, in definition order.
pub fn find_orphans(activities: &[Activity], graph: &ActivityGraph) -> Vec<String> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut orphans = Vec::new();

    for activity in activities {
        if !seen.insert(activity.name.as_str()) {
            continue;
        }
        if activities.len() > 1
            && graph.dependencies(&activity.name).is_empty()
            && graph.dependents(&activity.name).is_empty()
        {
            orphans.push(activity.name.clone());
        }
    }

    orphans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::Dependency;

    fn orphans_of(activities: Vec<Activity>) -> Vec<String> {
        let graph = ActivityGraph::build(&activities);
        find_orphans(&activities, &graph)
    }

    #[test]
    fn test_disconnected_activity_is_orphaned() {
        let orphans = orphans_of(vec![
            Activity::new("A", "Lookup"),
            Activity::new("B", "Copy").with_dependencies(vec![Dependency::on("A")]),
            Activity::new("Stray", "SetVariable"),
        ]);
        assert_eq!(orphans, vec!["Stray".to_string()]);
    }

    #[test]
    fn test_connected_activities_are_not_orphaned() {
        let orphans = orphans_of(vec![
            Activity::new("A", "Lookup"),
            Activity::new("B", "Copy").with_dependencies(vec![Dependency::on("A")]),
        ]);
        assert!(orphans.is_empty());
    }

    #[test]
    fn test_dangling_only_dependency_counts_as_orphan() {
        let orphans = orphans_of(vec![
            Activity::new("A", "Lookup"),
            Activity::new("B", "Copy").with_dependencies(vec![Dependency::on("A")]),
            Activity::new("C", "Copy").with_dependencies(vec![Dependency::on("Ghost")]),
        ]);
        assert_eq!(orphans, vec!["C".to_string()]);
    }

    #[test]
    fn test_self_loop_is_not_an_orphan() {
        let orphans = orphans_of(vec![
            Activity::new("A", "Copy").with_dependencies(vec![Dependency::on("A")]),
            Activity::new("B", "Lookup"),
        ]);
        assert_eq!(orphans, vec!["B".to_string()]);
    }

    #[test]
    fn test_single_activity_pipeline_has_no_orphans() {
        let orphans = orphans_of(vec![Activity::new("Solo", "Copy")]);
        assert!(orphans.is_empty());
    }
}
