use ndarray::Array1;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

/// One recorded decision: the state served by the environment, the action
/// taken on it, and the reward observed. Episodes terminate after a single
/// step, so `next_state` is always `None`.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub state: Array1<f32>,
    pub action: usize,
    pub reward: f32,
    pub next_state: Option<Array1<f32>>,
}

/// Bounded FIFO store of transitions. Once full, inserting evicts the oldest
/// entry.
#[derive(Clone)]
pub struct ReplayBuffer {
    buffer: VecDeque<Transition>,
    capacity: usize,
}

impl ReplayBuffer {
    pub fn new(capacity: usize) -> Self {
        ReplayBuffer {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn add(&mut self, transition: Transition) {
        if self.buffer.len() == self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(transition);
    }

    /// Draw up to `batch_size` transitions uniformly without replacement.
    pub fn sample<R: Rng + ?Sized>(&self, batch_size: usize, rng: &mut R) -> Vec<&Transition> {
        let mut indices = (0..self.buffer.len()).collect::<Vec<usize>>();
        indices.shuffle(rng);
        indices.truncate(batch_size);
        indices.into_iter().map(|i| &self.buffer[i]).collect()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest-to-newest iteration, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.buffer.iter()
    }
}
