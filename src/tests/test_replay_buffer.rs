use ndarray::array;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::replay_buffer::{ReplayBuffer, Transition};

fn tagged(id: usize) -> Transition {
    Transition {
        state: array![id as f32],
        action: id % 2,
        reward: if id % 2 == 0 { 1.0 } else { -1.0 },
        next_state: None,
    }
}

#[test]
fn test_add_and_sample() {
    let mut buffer = ReplayBuffer::new(10);
    let transition = tagged(0);
    buffer.add(transition.clone());
    assert_eq!(buffer.len(), 1);

    let mut rng = StdRng::seed_from_u64(0);
    let sample = buffer.sample(1, &mut rng);
    assert_eq!(sample[0], &transition);
}

#[test]
fn test_fifo_eviction_keeps_newest() {
    let capacity = 5;
    let mut buffer = ReplayBuffer::new(capacity);

    for id in 0..12 {
        buffer.add(tagged(id));
    }

    assert_eq!(buffer.len(), capacity);

    // Only the most recent `capacity` ids survive, in insertion order
    let ids: Vec<usize> = buffer.iter().map(|t| t.state[0] as usize).collect();
    assert_eq!(ids, vec![7, 8, 9, 10, 11]);
}

#[test]
fn test_sample_without_replacement() {
    let mut buffer = ReplayBuffer::new(100);
    for id in 0..20 {
        buffer.add(tagged(id));
    }

    let mut rng = StdRng::seed_from_u64(42);
    let sample = buffer.sample(10, &mut rng);
    assert_eq!(sample.len(), 10);

    let mut ids: Vec<usize> = sample.iter().map(|t| t.state[0] as usize).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 10, "sampled transitions must be distinct");
}

#[test]
fn test_sample_clamps_to_len() {
    let mut buffer = ReplayBuffer::new(10);
    for id in 0..4 {
        buffer.add(tagged(id));
    }

    let mut rng = StdRng::seed_from_u64(1);
    let sample = buffer.sample(10, &mut rng);
    assert_eq!(sample.len(), 4);
}

#[test]
fn test_is_empty_and_capacity() {
    let mut buffer = ReplayBuffer::new(3);
    assert!(buffer.is_empty());
    assert_eq!(buffer.capacity(), 3);

    buffer.add(tagged(0));
    assert!(!buffer.is_empty());
}
