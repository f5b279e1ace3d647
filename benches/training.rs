//! Benchmarks for the hot paths of the training loop: a single forward pass
//! and one batched optimization step at the production architecture.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::Array1;

use verdict::agent::DqnAgent;
use verdict::replay_buffer::{ReplayBuffer, Transition};
use verdict::schedule::ExplorationSchedule;

const INPUT_DIM: usize = 40;

fn filled_buffer(n: usize) -> ReplayBuffer {
    let mut buffer = ReplayBuffer::new(10_000);
    for id in 0..n {
        buffer.add(Transition {
            state: Array1::from_elem(INPUT_DIM, (id % 7) as f32 / 7.0),
            action: id % 2,
            reward: if id % 2 == 0 { 1.0 } else { -1.0 },
            next_state: None,
        });
    }
    buffer
}

fn bench_forward(c: &mut Criterion) {
    let mut agent =
        DqnAgent::with_seed(&[INPUT_DIM, 128, 64, 2], ExplorationSchedule::default(), 0.99, 0);
    let state = Array1::from_elem(INPUT_DIM, 0.5);

    c.bench_function("greedy_action", |b| {
        b.iter(|| agent.greedy_action(black_box(state.view())).unwrap())
    });
}

fn bench_optimize(c: &mut Criterion) {
    let mut agent =
        DqnAgent::with_seed(&[INPUT_DIM, 128, 64, 2], ExplorationSchedule::default(), 0.99, 0);
    let buffer = filled_buffer(1000);

    c.bench_function("optimize_batch_32", |b| {
        b.iter(|| agent.optimize(black_box(&buffer), 32, 1e-3).unwrap())
    });
}

criterion_group!(benches, bench_forward, bench_optimize);
criterion_main!(benches);
