//! End-to-end analyzer tests over realistic pipeline definitions

use pretty_assertions::assert_eq;

use pipelint_analysis::{FindingCategory, PipelineAnalyzer, Severity};

const WAREHOUSE_PIPELINE: &str = r#"{
    "name": "warehouse_load",
    "properties": {
        "description": "Loads the sales warehouse from the landing zone",
        "activities": [
            {
                "name": "GetWatermark",
                "type": "Lookup",
                "description": "Read the last load watermark",
                "policy": { "timeout": "0.00:10:00", "retry": 2 }
            },
            {
                "name": "CopySales",
                "type": "Copy",
                "description": "Copy incremental sales rows",
                "policy": { "timeout": "0.02:00:00", "retry": 3 },
                "dependsOn": [
                    { "activity": "GetWatermark", "dependencyConditions": ["Succeeded"] }
                ]
            },
            {
                "name": "CopyCustomers",
                "type": "Copy",
                "description": "Copy changed customers",
                "policy": { "timeout": "0.01:00:00", "retry": 3 },
                "dependsOn": [
                    { "activity": "GetWatermark", "dependencyConditions": ["Succeeded"] }
                ]
            },
            {
                "name": "TransformAll",
                "type": "ExecuteDataFlow",
                "description": "Join and conform the copied data",
                "policy": { "timeout": "0.03:00:00", "retry": 1 },
                "dependsOn": [
                    { "activity": "CopySales", "dependencyConditions": ["Succeeded"] },
                    { "activity": "CopyCustomers", "dependencyConditions": ["Succeeded"] }
                ]
            },
            {
                "name": "NotifyFailure",
                "type": "WebActivity",
                "description": "Page the on-call channel",
                "policy": { "timeout": "0.00:05:00" },
                "dependsOn": [
                    { "activity": "TransformAll", "dependencyConditions": ["Failed"] }
                ]
            },
            {
                "name": "LegacyCleanup",
                "type": "SqlServerStoredProcedure",
                "description": "Unused cleanup step kept for reference",
                "policy": { "timeout": "0.00:30:00" }
            }
        ],
        "parameters": {
            "loadDate": { "type": "string", "description": "Logical load date" },
            "environment": { "type": "string" }
        }
    }
}"#;

#[test]
fn test_warehouse_pipeline_structure() {
    let report = PipelineAnalyzer::new()
        .analyze_json(WAREHOUSE_PIPELINE)
        .unwrap();

    assert_eq!(report.pipeline_name.as_deref(), Some("warehouse_load"));
    assert_eq!(report.activity_count, 6);
    assert!(report.is_acyclic());
    assert_eq!(report.cycles, Vec::<Vec<String>>::new());

    // GetWatermark → Copy* → TransformAll → NotifyFailure
    assert_eq!(report.max_depth, 4);
    assert_eq!(
        report.critical_path,
        vec![
            "GetWatermark".to_string(),
            "CopySales".into(),
            "TransformAll".into(),
            "NotifyFailure".into(),
        ]
    );

    // Roots share depth 1; the two copies share depth 2.
    assert_eq!(report.parallel_groups.len(), 2);
    assert_eq!(report.parallel_groups[0].depth, 1);
    assert_eq!(
        report.parallel_groups[0].activities,
        vec!["GetWatermark".to_string(), "LegacyCleanup".into()]
    );
    assert_eq!(report.parallel_groups[1].depth, 2);
    assert_eq!(
        report.parallel_groups[1].activities,
        vec!["CopySales".to_string(), "CopyCustomers".into()]
    );

    assert_eq!(report.orphans, vec!["LegacyCleanup".to_string()]);

    let order = report.execution_order.as_ref().unwrap();
    let pos = |name: &str| order.iter().position(|n| n == name).unwrap();
    assert!(pos("GetWatermark") < pos("CopySales"));
    assert!(pos("TransformAll") < pos("NotifyFailure"));
}

#[test]
fn test_warehouse_pipeline_findings() {
    let report = PipelineAnalyzer::new()
        .analyze_json(WAREHOUSE_PIPELINE)
        .unwrap();

    // The undocumented 'environment' parameter is the only critical issue:
    // every dependent chain ends in a Failed-conditioned notifier, so only
    // activities with success-only conditions are flagged.
    let criticals: Vec<_> = report
        .findings
        .iter()
        .filter(|f| f.severity == Severity::Critical)
        .collect();
    assert!(criticals
        .iter()
        .any(|f| f.category == FindingCategory::Documentation
            && f.message.contains("environment")));

    // CopySales/CopyCustomers/TransformAll depend only on Succeeded.
    let error_handling: Vec<_> = report
        .findings
        .iter()
        .filter(|f| f.category == FindingCategory::ErrorHandling)
        .collect();
    assert_eq!(error_handling.len(), 3);

    // Everything carries a timeout and every copy retries: no resilience
    // findings.
    assert!(!report
        .findings
        .iter()
        .any(|f| f.category == FindingCategory::Resilience));
}

#[test]
fn test_warehouse_pipeline_metrics() {
    let report = PipelineAnalyzer::new()
        .analyze_json(WAREHOUSE_PIPELINE)
        .unwrap();

    assert_eq!(report.metrics.activity_types["Copy"], 2);
    assert_eq!(report.metrics.activity_types["Lookup"], 1);

    // Four activities have dependencies; only TransformAll is referenced
    // with a failure condition: 1/4.
    assert_eq!(report.metrics.error_coverage_pct, 25.0);

    // 6 activities, depth 4, no cycles: 30 + 40 = 70.
    assert_eq!(report.metrics.complexity_score, 70);

    // Critical path: Lookup (min 1) + Copy (5) + DataFlow (10) + Web (1),
    // maxes capped by each activity's timeout.
    assert_eq!(report.metrics.estimated_runtime.min_minutes, 17);
    assert_eq!(report.metrics.estimated_runtime.max_minutes, 315);
}

#[test]
fn test_report_serialization_is_stable() {
    let analyzer = PipelineAnalyzer::new();
    let a = analyzer.analyze_json(WAREHOUSE_PIPELINE).unwrap();
    let b = analyzer.analyze_json(WAREHOUSE_PIPELINE).unwrap();

    let a_json = serde_json::to_string(&a).unwrap();
    let b_json = serde_json::to_string(&b).unwrap();
    assert_eq!(a_json, b_json);
}

#[test]
fn test_cyclic_pipeline_report() {
    let raw = r#"{
        "name": "broken",
        "properties": {
            "activities": [
                {"name": "A", "type": "Copy",
                 "dependsOn": [{"activity": "B", "dependencyConditions": ["Succeeded"]}]},
                {"name": "B", "type": "Copy",
                 "dependsOn": [{"activity": "A", "dependencyConditions": ["Succeeded"]}]}
            ]
        }
    }"#;

    let report = PipelineAnalyzer::new().analyze_json(raw).unwrap();
    assert_eq!(
        report.cycles,
        vec![vec!["A".to_string(), "B".into(), "A".into()]]
    );
    assert!(report.execution_order.is_none());

    // Orphans have no edges at all, so they never intersect cycle members.
    for cycle in &report.cycles {
        for member in cycle {
            assert!(!report.orphans.contains(member));
        }
    }
}

#[test]
fn test_empty_pipeline_report() {
    let report = PipelineAnalyzer::new()
        .analyze_json(r#"{"name": "empty", "properties": {"activities": []}}"#)
        .unwrap();

    assert_eq!(report.activity_count, 0);
    assert_eq!(report.max_depth, 0);
    assert!(report.critical_path.is_empty());
    assert_eq!(report.metrics.error_coverage_pct, 100.0);
    assert_eq!(report.metrics.complexity_score, 0);
    assert_eq!(report.metrics.estimated_runtime.min_minutes, 0);
}
