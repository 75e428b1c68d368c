//! Benchmarks for confirmation processing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;
use std::sync::Arc;
use toolgate::chat::Decision;
use toolgate::events::NoOpSink;
use toolgate::orchestrator::ToolCallProcessor;
use toolgate::testing::{MockExecutor, TestTurn};
use toolgate::tools::{ExecutionTable, ToolDefinition, ToolRegistry};

fn processor() -> ToolCallProcessor {
    let executions = ExecutionTable::new().with(
        "getWeatherInformation",
        Arc::new(MockExecutor::new(json!("The weather in Porto is sunny"))),
    );
    let registry = ToolRegistry::builder()
        .tool(ToolDefinition::confirm("getWeatherInformation"))
        .build(&executions)
        .expect("benchmark registry must build");
    ToolCallProcessor::new(Arc::new(registry), Arc::new(executions))
}

fn process_benchmark(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("tokio runtime");
    let processor = processor();

    let mut turn = TestTurn::new("weather everywhere");
    for i in 0..200 {
        let decision = if i % 3 == 0 { Decision::No } else { Decision::Yes };
        turn = turn
            .text(format!("part {i}"))
            .answered(format!("c{i}"), "getWeatherInformation", json!({"city": "Porto"}), decision);
    }
    let messages = turn.build();

    c.bench_function("process_200_confirmations", |b| {
        b.iter(|| {
            let out = rt.block_on(processor.process(messages.clone(), &NoOpSink));
            black_box(out)
        });
    });

    let resolved = rt.block_on(processor.process(messages.clone(), &NoOpSink));
    c.bench_function("process_resolved_turn", |b| {
        b.iter(|| black_box(rt.block_on(processor.process(resolved.clone(), &NoOpSink))));
    });
}

criterion_group!(benches, process_benchmark);
criterion_main!(benches);
