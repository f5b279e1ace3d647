//! # Verdict - Single-Step DQN Ransomware Classifier Trainer
//!
//! Verdict trains a binary classifier that separates ransomware behavior
//! traces from benign ones, formulated as a single-step decision task solved
//! with value-based reinforcement learning. Every episode serves one feature
//! vector, scores one action against the vector's ground-truth label, and
//! terminates; a small feed-forward value network learns the reward as a
//! regression target from replayed transitions.
//!
//! After training, the learned parameters are flattened into a headerless
//! binary blob consumed by a separate low-level inference routine.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use verdict::agent::DqnAgent;
//! use verdict::env::DetectionEnv;
//! use verdict::replay_buffer::{ReplayBuffer, Transition};
//! use verdict::schedule::ExplorationSchedule;
//! use ndarray::Array1;
//!
//! let benign = vec![Array1::zeros(40); 4];
//! let ransomware = vec![Array1::ones(40); 4];
//! let mut env = DetectionEnv::new(benign, ransomware).unwrap();
//! let mut agent = DqnAgent::new(&[40, 128, 64, 2], ExplorationSchedule::default(), 0.99);
//! let mut buffer = ReplayBuffer::new(10_000);
//!
//! for _ in 0..100 {
//!     let state = env.reset();
//!     let action = agent.select_action(state.view()).unwrap();
//!     let outcome = env.step(action).unwrap();
//!     buffer.add(Transition { state, action, reward: outcome.reward, next_state: outcome.next_state });
//!     agent.optimize(&buffer, 32, 1e-3).unwrap();
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`agent`] - Learning agent: ε-greedy selection, reward-target updates, target sync
//! - [`config`] - Training configuration
//! - [`dataset`] - CSV corpus loading, windowing, and train/test splitting
//! - [`env`] - Single-step episodic environment over a labeled vector pool
//! - [`error`] - Error types and result handling
//! - [`export`] - Flat binary weight export
//! - [`logging`] - Tracing subscriber setup
//! - [`network`] - Feed-forward value network
//! - [`optimizer`] - Gradient-based update rules (SGD, Adam)
//! - [`replay_buffer`] - Bounded FIFO experience store
//! - [`schedule`] - Exploration-rate schedules
//! - [`trainer`] - Episode loop, progress logging, checkpointing

pub mod agent;
pub mod config;
pub mod dataset;
pub mod env;
pub mod error;
pub mod export;
pub mod logging;
pub mod network;
pub mod optimizer;
pub mod replay_buffer;
pub mod schedule;
pub mod trainer;

#[cfg(test)]
mod tests;
