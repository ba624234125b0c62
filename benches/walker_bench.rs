//! Benchmarks for fiend
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::path::Path;

fn benchmark_visited_set(c: &mut Criterion) {
    use fiend::walker::VisitedSet;

    c.bench_function("visited_test_and_insert", |b| {
        let mut set = VisitedSet::new();
        let mut ino = 0u64;

        b.iter(|| {
            ino = ino.wrapping_add(1);
            // one new identity, one repeat
            black_box(set.test_and_insert(1, ino));
            black_box(set.test_and_insert(1, ino));
        })
    });
}

fn benchmark_evaluate(c: &mut Criterion) {
    use fiend::expr::compile;

    let (name_only, _) = compile(&["-name", "*.txt"]).unwrap();
    let (name_or, _) = compile(&["-o", "-name", "*.[ch]", "-name", "data_??.bin"]).unwrap();
    let path = Path::new("/var/lib/project/src/module/data_42.bin");

    c.bench_function("evaluate_name_miss", |b| {
        let mut sink = std::io::sink();
        b.iter(|| black_box(name_only.evaluate(black_box(path), &mut sink)))
    });

    c.bench_function("evaluate_name_or_chain", |b| {
        let mut sink = std::io::sink();
        b.iter(|| black_box(name_or.evaluate(black_box(path), &mut sink)))
    });
}

criterion_group!(benches, benchmark_visited_set, benchmark_evaluate);
criterion_main!(benches);
