//! Analysis benchmarks
//!
//! Measures full analysis runs over synthetic pipelines: a deep sequential
//! chain and a wide fan-out, the two shapes that stress the depth analysis
//! and the rule engine respectively.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pipelint_analysis::{Activity, Dependency, Pipeline, PipelineAnalyzer};

fn chain_pipeline(len: usize) -> Pipeline {
    let activities = (0..len)
        .map(|i| {
            let activity = Activity::new(format!("step{i}"), "Copy");
            if i == 0 {
                activity
            } else {
                activity.with_dependencies(vec![Dependency::on(format!("step{}", i - 1))])
            }
        })
        .collect();

    Pipeline {
        name: Some("chain".to_string()),
        activities,
        ..Default::default()
    }
}

fn fan_out_pipeline(width: usize) -> Pipeline {
    let mut activities = vec![Activity::new("root", "Lookup")];
    activities.extend(
        (0..width).map(|i| {
            Activity::new(format!("leaf{i}"), "Copy")
                .with_dependencies(vec![Dependency::on("root")])
        }),
    );
    activities.push(Activity::new("sink", "ExecuteDataFlow").with_dependencies(
        (0..width).map(|i| Dependency::on(format!("leaf{i}"))).collect(),
    ));

    Pipeline {
        name: Some("fan_out".to_string()),
        activities,
        ..Default::default()
    }
}

fn bench_analysis(c: &mut Criterion) {
    let analyzer = PipelineAnalyzer::new();
    let chain = chain_pipeline(100);
    let fan = fan_out_pipeline(100);

    c.bench_function("analyze_chain_100", |b| {
        b.iter(|| analyzer.analyze(black_box(&chain)))
    });

    c.bench_function("analyze_fan_out_100", |b| {
        b.iter(|| analyzer.analyze(black_box(&fan)))
    });
}

criterion_group!(benches, bench_analysis);
criterion_main!(benches);
