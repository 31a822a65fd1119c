use calculator::interpreter::{evaluate, ParserMode};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn criterion_benchmark(c: &mut Criterion) {
    let expressions = [
        "1+2*3".to_string(),
        "4+32-6+33-72".to_string(),
        "1 + 2^(20/5/1)*3 - 2*5 + 3".to_string(),
        "fib(2^(fib 3))*4+1".to_string(),
        "((1+2)*(3+4))^2/(fib 10 - 50)!".to_string(),
    ];
    for mode in [ParserMode::Normal, ParserMode::Rpn] {
        let mut group = c.benchmark_group(format!("evaluate_{}", mode));
        for expression in &expressions {
            group.throughput(Throughput::Elements(expression.len() as u64));

            group.bench_with_input(
                BenchmarkId::from_parameter(expression),
                expression,
                |bencher, expression| {
                    bencher.iter(|| evaluate(expression, mode));
                },
            );
        }
        group.finish();
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
