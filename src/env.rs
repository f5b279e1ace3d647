//! Episodic environment over a labeled feature-vector pool.
//!
//! Each reset serves one vector drawn uniformly at random from the combined
//! benign + ransomware pool; each step scores the chosen action against the
//! ground-truth label of that vector and terminates the episode immediately.

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, VerdictError};

/// Action taken on a served sample: classify as benign.
pub const ACTION_BENIGN: usize = 0;
/// Action taken on a served sample: classify as ransomware.
pub const ACTION_RANSOMWARE: usize = 1;
/// Size of the action space.
pub const ACTIONS: usize = 2;

/// Result of a single environment step. Episodes are single-step, so
/// `next_state` is always `None` and `done` is always `true`.
#[derive(Clone, Debug)]
pub struct StepOutcome {
    pub next_state: Option<Array1<f32>>,
    pub reward: f32,
    pub done: bool,
}

/// Environment wrapping a labeled pool of behavior feature vectors.
#[derive(Debug)]
pub struct DetectionEnv {
    pool: Vec<Array1<f32>>,
    labels: Vec<usize>,
    current: Option<usize>,
    rng: StdRng,
}

impl DetectionEnv {
    /// Build an environment over the concatenation of a benign pool and a
    /// ransomware pool, in that fixed order. Fails if the combined pool is
    /// empty.
    pub fn new(benign: Vec<Array1<f32>>, ransomware: Vec<Array1<f32>>) -> Result<Self> {
        Self::with_rng(benign, ransomware, StdRng::from_entropy())
    }

    /// Like [`DetectionEnv::new`], with a fixed seed for reproducible resets.
    pub fn with_seed(benign: Vec<Array1<f32>>, ransomware: Vec<Array1<f32>>, seed: u64) -> Result<Self> {
        Self::with_rng(benign, ransomware, StdRng::seed_from_u64(seed))
    }

    fn with_rng(benign: Vec<Array1<f32>>, ransomware: Vec<Array1<f32>>, rng: StdRng) -> Result<Self> {
        if benign.is_empty() && ransomware.is_empty() {
            return Err(VerdictError::EmptyPool(
                "environment needs at least one labeled vector".to_string(),
            ));
        }

        let mut labels = vec![ACTION_BENIGN; benign.len()];
        labels.extend(std::iter::repeat(ACTION_RANSOMWARE).take(ransomware.len()));

        let mut pool = benign;
        pool.extend(ransomware);

        Ok(DetectionEnv {
            pool,
            labels,
            current: None,
            rng,
        })
    }

    /// Number of vectors in the pool.
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Serve one vector chosen uniformly at random from the pool, recording
    /// it as the current sample.
    pub fn reset(&mut self) -> Array1<f32> {
        let index = self.rng.gen_range(0..self.pool.len());
        self.current = Some(index);
        self.pool[index].clone()
    }

    /// Score `action` against the true label of the current sample. The
    /// episode is always terminal after exactly one step.
    pub fn step(&mut self, action: usize) -> Result<StepOutcome> {
        if action >= ACTIONS {
            return Err(VerdictError::InvalidAction {
                action,
                max_actions: ACTIONS,
            });
        }
        let current = self.current.ok_or_else(|| {
            VerdictError::TrainingError("step() called before reset()".to_string())
        })?;

        let reward = if action == self.labels[current] { 1.0 } else { -1.0 };

        Ok(StepOutcome {
            next_state: None,
            reward,
            done: true,
        })
    }
}
