use std::io;

use criterion::{criterion_group, criterion_main, Criterion};
use rlox::Lox;

fn run(src: &str) {
    let mut lox = Lox::new().with_output(Box::new(io::sink()));
    let reporter = lox.run(src).unwrap();
    assert!(reporter.diagnostics().is_empty());
}

fn fibonacci() {
    let src = r#"
        var a = 0;
        var b = 1;
        for (var i = 0; i < 10000; i = i + 1) {
            var next = a + b;
            a = b;
            b = next;
        }
        print a;
    "#;

    run(src);
}

fn nested_scopes() {
    let src = r#"
        var sum = 0;
        var i = 0;
        while (i < 2000) {
            var j = 0;
            while (j < 10) {
                {
                    var step = i * j;
                    if (step > 100 and step < 1000 or step == 0) sum = sum + 1;
                }
                j = j + 1;
            }
            i = i + 1;
        }
        print sum;
    "#;

    run(src);
}

fn strings() {
    let src = r#"
        var s = "";
        for (var i = 0; i < 2000; i = i + 1) s = s + "x";
        print s == s;
    "#;

    run(src);
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("my-benchmark");
    group.sample_size(20);
    group.bench_function("fib loop", |b| b.iter(fibonacci));
    group.bench_function("nested scopes", |b| b.iter(nested_scopes));
    group.bench_function("string concat", |b| b.iter(strings));
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
