//! Automaton engine benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dfasim_core::{Automaton, Symbol, Tokenization};

/// A ring of `n` states where "1" advances and "0" stays put.
fn ring_definition(n: usize) -> serde_json::Value {
    let transitions: serde_json::Map<String, serde_json::Value> = (0..n)
        .map(|i| {
            (
                format!("q{}", i),
                serde_json::json!({"0": format!("q{}", i), "1": format!("q{}", (i + 1) % n)}),
            )
        })
        .collect();

    serde_json::json!({
        "alphabet": ["0", "1"],
        "start_state": "q0",
        "accept_states": ["q0"],
        "transitions": transitions
    })
}

fn input_of_len(len: usize) -> Vec<Symbol> {
    let text: String = (0..len).map(|i| if i % 3 == 0 { '1' } else { '0' }).collect();
    Tokenization::Chars.split(&text)
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("automaton_load");

    for states in [2usize, 64, 1024] {
        let definition = ring_definition(states);
        group.bench_with_input(BenchmarkId::from_parameter(states), &definition, |b, def| {
            b.iter(|| black_box(Automaton::from_json(def).unwrap()))
        });
    }

    group.finish();
}

fn bench_simulate(c: &mut Criterion) {
    let mut group = c.benchmark_group("automaton_simulate");
    let automaton = Automaton::from_json(&ring_definition(16)).unwrap();

    for len in [10usize, 1_000, 100_000] {
        let input = input_of_len(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &input, |b, input| {
            b.iter(|| black_box(automaton.simulate(input)))
        });
    }

    group.finish();
}

fn bench_check(c: &mut Criterion) {
    let automaton = Automaton::from_json(&ring_definition(1024)).unwrap();

    c.bench_function("automaton_check", |b| {
        b.iter(|| black_box(automaton.check()))
    });
}

criterion_group!(benches, bench_load, bench_simulate, bench_check);
criterion_main!(benches);
